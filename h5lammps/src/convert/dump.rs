//! Writer for the LAMMPS text dump (`dump atom`-like, `id type x y z` columns).

use std::io::{self, Write};

use shared::{
    pbc,
    Frame,
    Mat33,
};

use crate::constants::{
    FLOAT_PRECISION as P,
    SPECIES_TYPE,
};


/// Append one frame block: nine header lines, then one line per particle.
///
/// Ids are assigned by position in the frame starting at 1. The box is
/// written as centered `lo hi` bounds with a zero tilt factor.
pub fn write_frame<W: Write>(w: &mut W, frame: &Frame, box_edges: &Mat33<f64>) -> io::Result<()> {
    let [[xlo, xhi], [ylo, yhi], [zlo, zhi]] = pbc::half_extents(box_edges);

    writeln!(w, "ITEM: TIMESTEP")?;
    writeln!(w, "{}", frame.timestep)?;
    writeln!(w, "ITEM: NUMBER OF ATOMS")?;
    writeln!(w, "{}", frame.natoms())?;
    writeln!(w, "ITEM: BOX BOUNDS xy xz yz pp pp pp")?;
    writeln!(w, "{xlo:.P$} {xhi:.P$} 0.0")?;
    writeln!(w, "{ylo:.P$} {yhi:.P$} 0.0")?;
    writeln!(w, "{zlo:.P$} {zhi:.P$} 0.0")?;
    writeln!(w, "ITEM: ATOMS id type x y z")?;

    for (i, pos) in frame.positions.rows().into_iter().enumerate() {
        writeln!(w, "{} {} {:.P$} {:.P$} {:.P$}", i + 1, SPECIES_TYPE, pos[0], pos[1], pos[2])?;
    }

    Ok(())
}


#[cfg(test)]
mod tests {
    use super::*;
    use shared::{diagonal_box, ndarray as nd};

    #[test]
    fn test_header_and_atoms() {
        let frame = Frame::new(42, nd::arr2(&[
            [-4.0, 4.0, 0.0],
            [1.25, -0.5, 4.999999],
            [0.1234567, 2.0, -5.0],
        ]), "F");

        let mut buf = Vec::new();
        write_frame(&mut buf, &frame, &diagonal_box([10.0, 10.0, 10.0])).unwrap();

        let expect = "\
ITEM: TIMESTEP
42
ITEM: NUMBER OF ATOMS
3
ITEM: BOX BOUNDS xy xz yz pp pp pp
-5.000000 5.000000 0.0
-5.000000 5.000000 0.0
-5.000000 5.000000 0.0
ITEM: ATOMS id type x y z
1 1 -4.000000 4.000000 0.000000
2 1 1.250000 -0.500000 4.999999
3 1 0.123457 2.000000 -5.000000
";
        assert_eq!(String::from_utf8(buf).unwrap(), expect);
    }

    #[test]
    fn test_anisotropic_box() {
        let frame = Frame::new(0, nd::Array2::zeros((0, 3)), "F");
        let mut buf = Vec::new();
        write_frame(&mut buf, &frame, &diagonal_box([3.0, 7.5, 0.2])).unwrap();

        let txt = String::from_utf8(buf).unwrap();
        let lines = txt.lines().collect::<Vec<_>>();
        assert_eq!(lines.len(), 9);
        assert_eq!(lines[3], "0");
        assert_eq!(lines[5], "-1.500000 1.500000 0.0");
        assert_eq!(lines[6], "-3.750000 3.750000 0.0");
        assert_eq!(lines[7], "-0.100000 0.100000 0.0");
    }
}
