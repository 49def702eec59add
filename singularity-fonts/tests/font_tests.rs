//! Integration tests for singularity-fonts crate.

use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use semver::Version;
use singularity_fonts::{
    FontCacheMode, FontError, FontList, FontLoader, FontSource, FontSourceGenerator, SwashLoader,
    Whence, generate_from_cache, init,
};

/// Loader that keeps every source it receives so tests can inspect them.
#[derive(Default)]
struct CapturingLoader {
    sources: Vec<FontSource>,
    version: Option<Version>,
}

impl FontLoader for CapturingLoader {
    type Font = (u32, usize);

    fn load(&mut self, source: FontSource, point_size: u32) -> Result<(u32, usize), FontError> {
        let len = match &source {
            FontSource::Buffer(file) => file.content().len(),
            FontSource::Path(path) => std::fs::read(path)
                .map_err(|source| FontError::Io {
                    path: path.clone(),
                    source,
                })?
                .len(),
        };
        self.sources.push(source);
        Ok((point_size, len))
    }

    fn backend_version(&self) -> Option<Version> {
        self.version.clone()
    }
}

/// DejaVu Sans, bundled under `fonts/` with its license.
const TEST_FONT: &[u8] = include_bytes!("../fonts/DejaVuSans.ttf");

fn font_fixture(bytes: &[u8]) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(bytes).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_init_old_backend_uses_direct_sources() {
    let loader = CapturingLoader {
        version: Some(Version::new(1, 9, 1)),
        ..Default::default()
    };
    assert_eq!(init(&loader), FontCacheMode::Direct);
}

#[test]
fn test_init_threshold_backend_uses_buffers() {
    for version in [Version::new(1, 9, 2), Version::new(2, 6, 0)] {
        let loader = CapturingLoader {
            version: Some(version),
            ..Default::default()
        };
        assert_eq!(init(&loader), FontCacheMode::Buffered);
    }
    assert_eq!(init(&SwashLoader::new()), FontCacheMode::Buffered);
}

#[test]
fn test_buffered_mode_reads_file_once() {
    let fixture = font_fixture(b"0123456789");
    let path = fixture.path().to_path_buf();
    let mut list = FontList::new(&path, 20, FontCacheMode::Buffered, CapturingLoader::default())
        .expect("font list");

    // The bytes are already in memory; the file is no longer needed.
    drop(fixture);
    assert!(!path.exists());

    for size in [4, 8, 12, 16] {
        let font = list.get(size).expect("buffered load");
        assert_eq!(*font, (size as u32, 10));
    }
}

#[test]
fn test_buffered_views_share_bytes() {
    let fixture = font_fixture(b"shared font bytes");
    let mut generator = generate_from_cache(fixture.path(), FontCacheMode::Buffered).unwrap();

    let (Some(FontSource::Buffer(a)), Some(FontSource::Buffer(mut b))) =
        (generator.next(), generator.next())
    else {
        panic!("buffered generator must yield buffers");
    };
    assert!(Arc::ptr_eq(a.content(), b.content()));

    b.seek(4, Whence::Start);
    assert_eq!(a.tell(), 0);
    assert_eq!(b.tell(), 4);
}

#[test]
fn test_direct_mode_yields_same_path_forever() {
    let path = PathBuf::from("data/fonts/DejaVuSans.ttf");
    let generator = generate_from_cache(&path, FontCacheMode::Direct).unwrap();
    assert_eq!(generator.mode(), FontCacheMode::Direct);

    for source in generator.take(1000) {
        match source {
            FontSource::Path(p) => assert_eq!(p, path),
            FontSource::Buffer(_) => panic!("direct generator yielded a buffer"),
        }
    }
}

#[test]
fn test_direct_mode_reads_on_each_load() {
    let fixture = font_fixture(b"abc");
    let mut list = FontList::new(
        fixture.path(),
        10,
        FontCacheMode::Direct,
        CapturingLoader::default(),
    )
    .unwrap();

    list.get(1).unwrap();
    drop(fixture);
    assert!(matches!(list.get(2), Err(FontError::Io { .. })));
    // Already realized sizes survive the file going away.
    assert!(list.get(1).is_ok());
}

#[test]
fn test_buffered_missing_file_fails_at_construction() {
    let result = FontList::new(
        "/nonexistent/singularity/font.ttf",
        10,
        FontCacheMode::Buffered,
        SwashLoader::new(),
    );
    assert!(matches!(result, Err(FontError::Io { .. })));
}

#[test]
fn test_max_size_five_consults_generator_once() {
    let mut list = FontList::with_generator(
        FontSourceGenerator::Buffered(Arc::from(&b"bytes"[..])),
        5,
        CapturingLoader::default(),
    );
    let first = list.get(3).unwrap();
    let second = list.get(3).unwrap();
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(list.loader().sources.len(), 1);
    assert_eq!(list.len(), 5);
}

#[test]
fn test_out_of_range_never_touches_generator() {
    let mut list = FontList::with_generator(
        FontSourceGenerator::Buffered(Arc::from(&b"bytes"[..])),
        5,
        CapturingLoader::default(),
    );
    assert!(matches!(
        list.get(5),
        Err(FontError::IndexOutOfRange { index: 5, max_size: 5 })
    ));
    assert!(matches!(
        list.get(-1),
        Err(FontError::IndexOutOfRange { index: -1, .. })
    ));
    assert!(list.loader().sources.is_empty());
}

#[test]
fn test_swash_loader_rejects_non_font_file() {
    let fixture = font_fixture(&[0u8; 256]);
    let mut list =
        FontList::new(fixture.path(), 10, FontCacheMode::Buffered, SwashLoader::new()).unwrap();
    assert!(matches!(
        list.get(9),
        Err(FontError::InvalidFont { point_size: 9 })
    ));
    assert!(!list.is_loaded(9));
}

fn assert_realized(list: &mut FontList<SwashLoader>, size: i32) {
    let font = list.get(size).unwrap();
    assert_eq!(font.point_size, size as u32);
    assert_eq!(font.data.data.len(), TEST_FONT.len());
    assert!(font.ascent() > 0.0);
    assert!(font.descent() > 0.0);
    assert!(font.line_height() >= font.ascent() + font.descent());

    let again = list.get(size).unwrap();
    assert!(Arc::ptr_eq(&font, &again));
}

#[test]
fn test_swash_loader_realizes_buffered_font() {
    let fixture = font_fixture(TEST_FONT);
    let mut list =
        FontList::new(fixture.path(), 100, FontCacheMode::Buffered, SwashLoader::new()).unwrap();

    // The bytes are already in memory; the file is not needed any more.
    let path = fixture.path().to_path_buf();
    drop(fixture);
    assert!(!path.exists());

    assert_realized(&mut list, 12);
    assert_realized(&mut list, 48);
    assert_eq!(list.cached_sizes(), vec![12, 48]);

    // Both sizes borrow the one buffer.
    let small = list.get(12).unwrap();
    let large = list.get(48).unwrap();
    assert!(Arc::ptr_eq(&small.data.data, &large.data.data));
}

#[test]
fn test_swash_loader_realizes_direct_font() {
    let fixture = font_fixture(TEST_FONT);
    let mut list =
        FontList::new(fixture.path(), 100, FontCacheMode::Direct, SwashLoader::new()).unwrap();

    assert_realized(&mut list, 12);
    assert_realized(&mut list, 48);
    assert_eq!(list.cached_sizes(), vec![12, 48]);
}

#[test]
fn test_swash_metrics_scale_with_point_size() {
    let fixture = font_fixture(TEST_FONT);
    let mut list =
        FontList::new(fixture.path(), 100, FontCacheMode::Buffered, SwashLoader::new()).unwrap();

    let small = list.get(10).unwrap();
    let large = list.get(40).unwrap();
    let ratio = large.line_height() / small.line_height();
    assert!((ratio - 4.0).abs() < 1e-3, "ratio was {ratio}");
}

#[test]
fn test_error_messages() {
    let err = FontError::IndexOutOfRange {
        index: 120,
        max_size: 100,
    };
    assert_eq!(err.to_string(), "font size 120 out of range (max size 100)");
}
