//! Periodic boundary handling for orthorhombic boxes.
//!
//! Only the diagonal of the box matrix is honored; tilt components are ignored.
//! A triclinic box needs a full minimum-image treatment instead of extending these helpers.

use num_traits::Float;

use crate::{
    ndarray as nd,
    Axis,
    Mat33,
    Result,
    ensure,
};


/// Edge lengths `[Lx, Ly, Lz]` taken from the diagonal of the box matrix.
pub fn box_lengths<T: Float>(edges: &Mat33<T>) -> [T; 3] {
    [edges[0][0], edges[1][1], edges[2][2]]
}


/// `[lo, hi]` per axis for a box centered at the origin.
pub fn half_extents<T: Float>(edges: &Mat33<T>) -> [[T; 2]; 3] {
    let two = T::one() + T::one();
    box_lengths(edges).map(|l| [-l / two, l / two])
}


pub fn check_box(edges: &Mat33<f64>) -> Result<()> {
    let lengths = box_lengths(edges);
    for ax in Axis::ALL {
        let l = lengths[ax.index()];
        ensure!(l.is_finite() && l > 0.0,
            "Box edge along {} must be positive and finite, got {}.", ax, l);
    }
    Ok(())
}


/// Map `c` into `[-l/2, l/2)`, i.e. `((c + l/2) mod l) - l/2` with floor modulo.
pub fn wrap_coord<T: Float>(c: T, l: T) -> T {
    let half = l / (T::one() + T::one());
    let mut r = (c + half) % l;
    if r < T::zero() {
        r = r + l;
    }
    // tiny negative remainders round up to `l` after the shift
    if r >= l {
        r = r - l;
    }
    r - half
}


/// Wrap an `(N, 3)` array of positions into the centered box.
pub fn wrap_positions(positions: nd::ArrayView2<f64>, edges: &Mat33<f64>) -> Result<nd::Array2<f64>> {
    ensure!(positions.ncols() == 3,
        "Positions should have 3 columns, got shape {:?}.", positions.shape());

    let lengths = box_lengths(edges);
    let mut ret = positions.to_owned();
    ret.axis_iter_mut(nd::Axis(1))
        .zip(lengths.iter())
        .for_each(|(mut col, &l)| col.mapv_inplace(|c| wrap_coord(c, l)));

    Ok(ret)
}
