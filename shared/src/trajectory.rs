use std::fmt;
use std::iter::StepBy;
use std::ops::Range;

use crate::{
    Array2,
    Result,
    ensure,
};


/// One snapshot of the particles, positions already wrapped into the box.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    pub timestep:  usize,
    pub positions: Array2<f64>,     // [natoms, 3]
    pub species:   Vec<String>,     // [natoms]
}


impl Frame {
    /// Every particle in the frame gets the same species `label`.
    pub fn new(timestep: usize, positions: Array2<f64>, label: &str) -> Self {
        let species = vec![label.to_string(); positions.nrows()];
        Self { timestep, positions, species }
    }

    pub fn natoms(&self) -> usize { self.positions.nrows() }
}


/// Frames `start .. end` taken every `every` steps, `end` being exclusive.
///
/// `end == None` stands for "through the last stored frame" and is resolved
/// against the trajectory length with [`FrameRange::resolve`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameRange {
    pub start: usize,
    pub end:   Option<usize>,
    pub every: usize,
}


impl Default for FrameRange {
    fn default() -> Self {
        Self {
            start: 0,
            end:   None,
            every: 1,
        }
    }
}


impl FrameRange {
    /// Build from the `[start, end]` pair where `end = -1` means the end of the trajectory.
    pub fn from_sentinel(range: [i64; 2], every: usize) -> Result<Self> {
        let [start, end] = range;
        ensure!(start >= 0, "Start of range must not be negative, got {}.", start);
        ensure!(end >= -1, "End of range must be -1 (till the last frame) or non-negative, got {}.", end);
        ensure!(every >= 1, "Stride `every` must be at least 1, got {}.", every);

        Ok(Self {
            start: start as usize,
            end:   if end == -1 { None } else { Some(end as usize) },
            every,
        })
    }

    /// Concrete `start .. end` once the number of stored frames is known.
    pub fn resolve(&self, nframes: usize) -> Result<Range<usize>> {
        let end = self.end.unwrap_or(nframes);
        ensure!(self.start <= end, "Start of range {} is greater than its end {}.", self.start, end);
        Ok(self.start .. end)
    }

    pub fn steps(&self, nframes: usize) -> Result<StepBy<Range<usize>>> {
        ensure!(self.every >= 1, "Stride `every` must be at least 1, got {}.", self.every);
        Ok(self.resolve(nframes)?.step_by(self.every))
    }
}


impl fmt::Display for FrameRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.end {
            Some(end) => write!(f, "{} .. {}", self.start, end)?,
            None      => write!(f, "{} .. <last frame>", self.start)?,
        }
        write!(f, " every {} step(s)", self.every)
    }
}
