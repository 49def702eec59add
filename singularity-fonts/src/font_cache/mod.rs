//! Size-indexed font cache with lazy loading.
//!
//! Fonts are realized on first access per point size and kept for the
//! lifetime of the list. The source generator is consulted at most once per
//! distinct size, so no more than one font file is being opened at a time.

mod font_file;
mod source;

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use crate::error::FontError;
use crate::loader::FontLoader;

pub use font_file::{FontFile, Whence};
pub use source::{
    FontCacheMode, FontSource, FontSourceGenerator, MIN_BUFFERED_VERSION, generate_from_cache,
    init,
};

/// Lazily populated list of fonts indexed by point size.
pub struct FontList<L: FontLoader> {
    fonts: HashMap<u32, Arc<L::Font>>,
    max_size: usize,
    generator: FontSourceGenerator,
    loader: L,
}

impl<L: FontLoader> FontList<L> {
    /// Create a font list for `filename`.
    ///
    /// In buffered mode the file is read here, once; no font is realized yet.
    /// A missing or unreadable file therefore fails at construction instead
    /// of on the first `get`, where a deferred read would have surfaced it.
    pub fn new(
        filename: impl AsRef<Path>,
        max_size: usize,
        mode: FontCacheMode,
        loader: L,
    ) -> Result<Self, FontError> {
        let generator = generate_from_cache(filename, mode)?;
        Ok(Self::with_generator(generator, max_size, loader))
    }

    /// Create a font list over an existing source generator.
    pub fn with_generator(generator: FontSourceGenerator, max_size: usize, loader: L) -> Self {
        FontList {
            fonts: HashMap::new(),
            max_size,
            generator,
            loader,
        }
    }

    /// Capacity of the list, not the number of realized fonts.
    pub fn len(&self) -> usize {
        self.max_size
    }

    pub fn is_empty(&self) -> bool {
        self.max_size == 0
    }

    /// Whether `index` is a valid point size for this list.
    pub fn contains(&self, index: i32) -> bool {
        Self::slot(index, self.max_size).is_some()
    }

    /// Get the font for point size `index`, loading it on first use.
    pub fn get(&mut self, index: i32) -> Result<Arc<L::Font>, FontError> {
        let size = Self::slot(index, self.max_size).ok_or(FontError::IndexOutOfRange {
            index,
            max_size: self.max_size,
        })?;

        if let Some(font) = self.fonts.get(&size) {
            return Ok(Arc::clone(font));
        }

        let source = self.generator.next_source();
        log::debug!("Loading font at size {} from {:?} source", size, self.generator.mode());
        let font = Arc::new(self.loader.load(source, size)?);
        self.fonts.insert(size, Arc::clone(&font));
        Ok(font)
    }

    /// Whether point size `index` has already been realized.
    pub fn is_loaded(&self, index: i32) -> bool {
        Self::slot(index, self.max_size).is_some_and(|size| self.fonts.contains_key(&size))
    }

    /// Realized point sizes in ascending order.
    pub fn cached_sizes(&self) -> Vec<u32> {
        let mut sizes: Vec<u32> = self.fonts.keys().copied().collect();
        sizes.sort_unstable();
        sizes
    }

    pub fn mode(&self) -> FontCacheMode {
        self.generator.mode()
    }

    pub fn loader(&self) -> &L {
        &self.loader
    }

    fn slot(index: i32, max_size: usize) -> Option<u32> {
        let size = u32::try_from(index).ok()?;
        ((size as usize) < max_size).then_some(size)
    }
}
