//! Lazy font loading for Endgame: Singularity.
//!
//! This crate provides:
//! - A size-indexed font cache (`FontList`) that realizes fonts on first use
//! - A font source generator that either hands out the font path or reuses
//!   the file's bytes read once into memory
//! - A read-only in-memory font buffer (`FontFile`) with clamped seeking
//! - A `FontLoader` seam with a swash-backed implementation
//!
//! # Architecture
//!
//! Every distinct point size used to hold its own open file. `FontList`
//! avoids that by consulting the generator at most once per requested size,
//! lazily. When the backend supports in-memory sources the file is read
//! exactly once and every size shares the same bytes.

pub mod error;
pub mod font_cache;
pub mod loader;
pub mod types;

// Re-export main types for convenience
pub use error::FontError;
pub use font_cache::{
    FontCacheMode, FontFile, FontList, FontSource, FontSourceGenerator,
    MIN_BUFFERED_VERSION, Whence, generate_from_cache, init,
};
pub use loader::{FontLoader, SwashLoader};
pub use types::{FontData, SizedFont};
