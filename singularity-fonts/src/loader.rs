//! Font backend seam.
//!
//! `FontList` only knows how to ask a [`FontLoader`] for a font at a size.
//! The swash implementation is what the game uses; tests plug in their own.

use std::sync::Arc;

use semver::Version;

use crate::error::FontError;
use crate::font_cache::FontSource;
use crate::types::{FontData, SizedFont};

/// Builds renderable fonts from font sources.
pub trait FontLoader {
    /// Font object produced for one point size.
    type Font;

    /// Realize a font from `source` at `point_size`.
    fn load(&mut self, source: FontSource, point_size: u32) -> Result<Self::Font, FontError>;

    /// Version of the underlying font backend, if it has one worth checking.
    fn backend_version(&self) -> Option<Version> {
        None
    }
}

/// Loads fonts with swash.
///
/// Path sources are read with one short-lived open per load. Buffer sources
/// reuse their shared bytes without copying.
#[derive(Debug, Default, Clone, Copy)]
pub struct SwashLoader;

impl SwashLoader {
    pub fn new() -> Self {
        SwashLoader
    }
}

impl FontLoader for SwashLoader {
    type Font = SizedFont;

    fn load(&mut self, source: FontSource, point_size: u32) -> Result<SizedFont, FontError> {
        let bytes: Arc<[u8]> = match source {
            FontSource::Path(path) => {
                let data = std::fs::read(&path).map_err(|source| FontError::Io {
                    path: path.clone(),
                    source,
                })?;
                Arc::from(data)
            }
            FontSource::Buffer(file) => Arc::clone(file.content()),
        };

        let data = FontData::new(bytes).ok_or(FontError::InvalidFont { point_size })?;
        log::debug!("Realized font at size {}", point_size);
        Ok(SizedFont { data, point_size })
    }
}
