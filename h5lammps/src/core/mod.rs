pub mod config;
pub use config::*;

pub mod source;
pub use source::*;
