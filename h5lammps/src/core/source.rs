use shared::{
    ndarray as nd,
    pbc,
    warn,
    Frame,
    Mat33,
    Result,
};

use crate::constants::SPECIES_LABEL;


/// Random access to a stored trajectory of `(nframes, natoms, 3)` positions in a fixed box.
pub trait TrajectorySource {
    /// Length of the position series along its time axis.
    fn count_frames(&self) -> usize;

    fn read_box_edges(&self) -> Result<Mat33<f64>>;

    /// Unwrapped positions of frame `istep`, shape `(natoms, 3)`.
    ///
    /// Callers guarantee `istep < self.count_frames()`.
    fn read_raw_positions(&self, istep: usize) -> Result<nd::Array2<f64>>;

    /// Read and wrap frame `istep`.
    ///
    /// `Ok(None)` if `istep` lies beyond the stored frames, which is an
    /// expected condition at the tail of a requested range.
    fn read_frame(&self, istep: usize, box_edges: &Mat33<f64>) -> Result<Option<Frame>> {
        let nframes = self.count_frames();
        if istep >= nframes {
            warn!("Time step {} is out of bounds (only {} frames stored), skipped.", istep, nframes);
            return Ok(None);
        }

        let raw = self.read_raw_positions(istep)?;
        let wrapped = pbc::wrap_positions(raw.view(), box_edges)?;
        Ok(Some(Frame::new(istep, wrapped, SPECIES_LABEL)))
    }
}
