pub mod cli;
pub use cli::OptProcess;
pub mod constants;
pub mod logging;
pub mod version;

pub mod core;
pub mod convert;
