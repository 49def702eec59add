//! Configuration system for the Endgame: Singularity engine core.
//!
//! This crate provides configuration loading, saving and default values:
//!
//! - Font settings (font file, size capacity, source caching policy)
//! - Periodic event timers to install at startup
//! - Log level

pub mod config;
pub mod error;
mod persistence;
mod types;

// Re-export main types for convenience
pub use config::{Config, FontConfig, TimerConfig};
pub use error::ConfigError;
pub use types::{CacheModeSetting, LogLevel};
