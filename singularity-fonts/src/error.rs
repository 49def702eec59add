//! Typed error types for singularity-fonts.
//!
//! Callers can match on the bounds failure separately from I/O and parse
//! failures instead of relying on opaque strings.

use std::path::PathBuf;

use thiserror::Error;

/// Errors produced by the font cache and font loaders.
#[derive(Debug, Error)]
pub enum FontError {
    /// A point size outside `[0, max_size)` was requested.
    #[error("font size {index} out of range (max size {max_size})")]
    IndexOutOfRange {
        /// Requested point size.
        index: i32,
        /// Capacity of the font list.
        max_size: usize,
    },

    /// The font file could not be read.
    #[error("failed to read font file '{}': {source}", path.display())]
    Io {
        /// Path of the font file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The font bytes could not be parsed.
    #[error("invalid font data for size {point_size}")]
    InvalidFont {
        /// Point size that was being realized.
        point_size: u32,
    },
}
