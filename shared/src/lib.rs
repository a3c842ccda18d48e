use std::fmt;

pub use anyhow::{
    self,
    Result,
    Context,
    bail,
    ensure,
};
pub use ndarray::{
    self,
    Array2,
};
pub use log::{
    self,
    warn,
    info,
    debug,
    error,
};

pub mod pbc;
pub mod trajectory;

pub use trajectory::{
    Frame,
    FrameRange,
};

pub type Mat33<T> = [[T;3];3];   // 3x3 matrix, rows are box edge vectors


#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}


impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }
}


impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", match self {
            Axis::X => "x",
            Axis::Y => "y",
            Axis::Z => "z",
        })
    }
}


/// Build a box matrix from three edge lengths, leaving the tilt components zero.
pub fn diagonal_box(lengths: [f64; 3]) -> Mat33<f64> {
    let mut ret = [[0.0; 3]; 3];
    for ax in Axis::ALL {
        ret[ax.index()][ax.index()] = lengths[ax.index()];
    }
    ret
}


#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_axis_index() {
        assert_eq!(Axis::ALL.map(Axis::index), [0, 1, 2]);
        assert_eq!(Axis::Y.to_string(), "y");
    }

    #[test]
    fn test_diagonal_box() {
        let b = diagonal_box([10.0, 20.0, 30.0]);
        assert_eq!(b, [[10.0, 0.0, 0.0], [0.0, 20.0, 0.0], [0.0, 0.0, 30.0]]);
    }
}
