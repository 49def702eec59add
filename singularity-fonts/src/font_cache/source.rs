//! Font source selection and the lazy source generator.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use semver::Version;

use super::font_file::FontFile;
use crate::error::FontError;
use crate::loader::FontLoader;

/// Oldest backend version known to load fonts from memory without crashing.
pub const MIN_BUFFERED_VERSION: Version = Version::new(1, 9, 2);

/// How a font source generator hands out font files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FontCacheMode {
    /// Hand out the path; the backend opens the file itself on every load.
    Direct,
    /// Read the file once and hand out in-memory views over its bytes.
    #[default]
    Buffered,
}

impl FontCacheMode {
    /// Pick a mode from the backend's reported version.
    ///
    /// Backends that report no version are assumed to handle buffers.
    pub fn for_backend_version(version: Option<&Version>) -> Self {
        match version {
            Some(v) if *v < MIN_BUFFERED_VERSION => FontCacheMode::Direct,
            _ => FontCacheMode::Buffered,
        }
    }
}

/// Probe the font backend and decide the cache mode for this process.
pub fn init<L: FontLoader + ?Sized>(loader: &L) -> FontCacheMode {
    let version = loader.backend_version();
    let mode = FontCacheMode::for_backend_version(version.as_ref());
    match version {
        Some(v) => log::info!("Font backend version {}, using {:?} font sources", v, mode),
        None => log::info!("Font backend reports no version, using {:?} font sources", mode),
    }
    mode
}

/// Something the font backend can open.
#[derive(Debug, Clone)]
pub enum FontSource {
    /// Path to the font file on disk.
    Path(PathBuf),
    /// In-memory view over the font file's bytes.
    Buffer(FontFile),
}

/// Infinite sequence of font sources for one font file.
///
/// In [`FontCacheMode::Buffered`] the file is read once, at construction, and
/// every pull yields a fresh [`FontFile`] over the same bytes. In
/// [`FontCacheMode::Direct`] every pull yields the same path.
#[derive(Debug, Clone)]
pub enum FontSourceGenerator {
    /// Hands out this path on every pull; the loader opens it each time.
    Direct(PathBuf),
    /// Hands out a new [`FontFile`] view of these bytes on every pull.
    Buffered(Arc<[u8]>),
}

impl FontSourceGenerator {
    /// Build a generator for `path` in `mode`. Buffered mode reads the whole
    /// file now and fails with [`FontError::Io`] if that read fails.
    pub fn new(path: impl AsRef<Path>, mode: FontCacheMode) -> Result<Self, FontError> {
        let path = path.as_ref();
        match mode {
            FontCacheMode::Direct => Ok(FontSourceGenerator::Direct(path.to_path_buf())),
            FontCacheMode::Buffered => {
                let bytes = std::fs::read(path).map_err(|source| FontError::Io {
                    path: path.to_path_buf(),
                    source,
                })?;
                log::debug!("Buffered {} bytes of {:?}", bytes.len(), path);
                Ok(FontSourceGenerator::Buffered(Arc::from(bytes)))
            }
        }
    }

    pub fn mode(&self) -> FontCacheMode {
        match self {
            FontSourceGenerator::Direct(_) => FontCacheMode::Direct,
            FontSourceGenerator::Buffered(_) => FontCacheMode::Buffered,
        }
    }

    /// Produce the next source. Never fails and never touches the disk.
    pub fn next_source(&mut self) -> FontSource {
        match self {
            FontSourceGenerator::Direct(path) => FontSource::Path(path.clone()),
            FontSourceGenerator::Buffered(bytes) => {
                FontSource::Buffer(FontFile::new(Arc::clone(bytes)))
            }
        }
    }
}

impl Iterator for FontSourceGenerator {
    type Item = FontSource;

    fn next(&mut self) -> Option<FontSource> {
        Some(self.next_source())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (usize::MAX, None)
    }
}

/// Build the source generator for `filename` in the given mode.
pub fn generate_from_cache(
    filename: impl AsRef<Path>,
    mode: FontCacheMode,
) -> Result<FontSourceGenerator, FontError> {
    FontSourceGenerator::new(filename, mode)
}
