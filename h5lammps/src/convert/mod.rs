pub mod config;
pub use config::ConvertConfig;

pub mod h5source;
pub use h5source::H5Trajectory;

pub mod dump;

pub mod convert_impl;
pub use convert_impl::{
    convert_frames,
    run,
    ConvertSummary,
};

pub mod command;
pub use command::ConvertCommand;
