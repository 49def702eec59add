//! Font data types produced by the swash loader.

use std::sync::Arc;
use swash::FontRef;

/// Stores font data with lifetime management.
///
/// This struct shares the font data bytes and provides a `FontRef` that can be
/// used for metrics and glyph lookups. The `FontRef` is guaranteed to be valid
/// for the lifetime of this struct.
#[derive(Clone)]
pub struct FontData {
    /// Raw font data bytes (TTF/OTF), shared between point sizes
    pub data: Arc<[u8]>,
    /// Swash font reference for glyph operations
    pub font_ref: FontRef<'static>,
}

impl std::fmt::Debug for FontData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontData")
            .field("data_len", &self.data.len())
            .finish()
    }
}

impl FontData {
    /// Create a new FontData from shared bytes using face index 0.
    ///
    /// # Returns
    /// `Some(FontData)` if the font data is valid, `None` otherwise.
    pub fn new(data: Arc<[u8]>) -> Option<Self> {
        Self::new_with_index(data, 0)
    }

    /// Create a new FontData from shared bytes with a specific face index.
    ///
    /// Needed for TrueType Collection (.ttc) files where several faces share
    /// the same data.
    pub fn new_with_index(data: Arc<[u8]>, face_index: usize) -> Option<Self> {
        // SAFETY: The bytes live in an Arc stored alongside the FontRef, so they
        // outlive it. The Arc's heap allocation never moves.
        let font_ref = unsafe {
            let bytes: &[u8] = &data;
            let static_bytes: &'static [u8] = std::mem::transmute(bytes);
            FontRef::from_index(static_bytes, face_index)?
        };

        Some(FontData { data, font_ref })
    }
}

/// A font realized at one point size.
#[derive(Debug, Clone)]
pub struct SizedFont {
    pub data: FontData,
    pub point_size: u32,
}

impl SizedFont {
    fn metrics(&self) -> swash::Metrics {
        self.data.font_ref.metrics(&[]).scale(self.point_size as f32)
    }

    /// Distance from the baseline to the top of the tallest glyph, in pixels.
    pub fn ascent(&self) -> f32 {
        self.metrics().ascent
    }

    /// Distance from the baseline to the bottom of the lowest glyph, in pixels.
    pub fn descent(&self) -> f32 {
        self.metrics().descent
    }

    /// Recommended distance between consecutive baselines, in pixels.
    pub fn line_height(&self) -> f32 {
        let m = self.metrics();
        m.ascent + m.descent + m.leading
    }
}
