use std::path::{Path, PathBuf};

use hdf5::{
    Dataset,
    File as H5File,
};
use shared::{
    ndarray as nd,
    pbc,
    bail,
    ensure,
    diagonal_box,
    Context,
    Mat33,
    Result,
};

use crate::core::TrajectorySource;


/// Position time series and box of one particle group in an H5MD file.
///
/// Layout:
///   - `/particles/<group>/box/edges`: `(3, 3)` edge matrix, or `(3,)` edge lengths;
///   - `/particles/<group>/position/value`: `(nframes, natoms, 3)`.
pub struct H5Trajectory {
    fname:    PathBuf,
    file:     H5File,
    group:    String,
    position: Dataset,
    nframes:  usize,
}


impl H5Trajectory {
    pub fn box_path(group: &str) -> String {
        format!("/particles/{}/box/edges", group)
    }

    pub fn position_path(group: &str) -> String {
        format!("/particles/{}/position/value", group)
    }

    pub fn open<P>(fname: P, group: &str) -> Result<Self>
    where P: AsRef<Path> {
        let fname = fname.as_ref().to_path_buf();
        let file = H5File::open(&fname)
            .with_context(|| format!("Failed to open {:?} as HDF5 file.", &fname))?;

        let path = Self::position_path(group);
        let position = file.dataset(&path)
            .with_context(|| format!("Missing required dataset {:?} in {:?}.", &path, &fname))?;

        let shape = position.shape();
        ensure!(shape.len() == 3 && shape[2] == 3,
            "Malformed dataset {:?} in {:?}: expected shape (nframes, natoms, 3), got {:?}.",
            &path, &fname, shape);

        Ok(Self {
            fname,
            file,
            group: group.to_string(),
            position,
            nframes: shape[0],
        })
    }

    pub fn get_fname(&self) -> &PathBuf { &self.fname }
    pub fn get_natoms(&self) -> usize { self.position.shape()[1] }
}


impl TrajectorySource for H5Trajectory {
    fn count_frames(&self) -> usize { self.nframes }

    fn read_box_edges(&self) -> Result<Mat33<f64>> {
        let path = Self::box_path(&self.group);
        let ds = self.file.dataset(&path)
            .with_context(|| format!("Missing required dataset {:?} in {:?}.", &path, &self.fname))?;

        let edges = match ds.ndim() {
            2 => {
                let m: nd::Array2<f64> = ds.read_2d()?;
                ensure!(m.dim() == (3, 3), "Malformed box {:?}: expected shape (3, 3), got {:?}.", &path, m.shape());
                let mut ret = [[0.0; 3]; 3];
                for ((i, j), v) in m.indexed_iter() {
                    ret[i][j] = *v;
                }
                ret
            },
            1 => {
                let v: nd::Array1<f64> = ds.read_1d()?;
                ensure!(v.len() == 3, "Malformed box {:?}: expected 3 edge lengths, got {}.", &path, v.len());
                diagonal_box([v[0], v[1], v[2]])
            },
            n => bail!("Malformed box {:?}: expected a 1D or 2D dataset, got {}D.", &path, n),
        };

        pbc::check_box(&edges)
            .with_context(|| format!("Invalid box {:?} in {:?}.", &path, &self.fname))?;
        Ok(edges)
    }

    fn read_raw_positions(&self, istep: usize) -> Result<nd::Array2<f64>> {
        self.position.read_slice_2d::<f64, _>(nd::s![istep, .., ..])
            .with_context(|| format!("Failed to read frame {} from {:?}.", istep, &self.fname))
    }
}


/// Write a minimal H5MD file holding one particle group.
#[cfg(test)]
pub(crate) fn write_h5md<P, D>(fname: P, group: &str, edges: &nd::Array<f64, D>, positions: &nd::Array3<f64>) -> Result<()>
where P: AsRef<Path>,
      D: nd::Dimension,
{
    let f = H5File::create(fname)?;
    let g = f.create_group("particles")?.create_group(group)?;
    g.create_group("box")?
        .new_dataset_builder().with_data(edges).create("edges")?;
    g.create_group("position")?
        .new_dataset_builder().with_data(positions).create("value")?;
    Ok(())
}
