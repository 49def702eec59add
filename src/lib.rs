// Library exports for testing and potential library use

/// Application version (root crate version, for use by sub-crates).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod app;
pub mod cli;
pub mod debug;

pub use singularity_config as config;
pub use singularity_fonts as fonts;
pub use singularity_timer as timer;
