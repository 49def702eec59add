//! Read-only in-memory view over a font file's bytes.

use std::io::{self, SeekFrom};
use std::sync::Arc;

/// Origin for [`FontFile::seek`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Whence {
    /// Absolute offset from the beginning.
    Start,
    /// Relative to the current position.
    Current,
    /// Relative to the logical end offset.
    End,
}

/// Buffer object over a cached font file.
///
/// Every view shares the same bytes; only the cursor is per-view.
///
/// The logical end offset is `len - 1`, so the last byte of the file is never
/// returned by [`read`](Self::read) and `read` leaves the cursor where it was.
/// Because of that `std::io::Read` is not implemented: `read_to_end` would
/// never terminate.
#[derive(Clone)]
pub struct FontFile {
    content: Arc<[u8]>,
    position: usize,
    end: usize,
}

impl std::fmt::Debug for FontFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontFile")
            .field("data_len", &self.content.len())
            .field("position", &self.position)
            .field("end", &self.end)
            .finish()
    }
}

impl FontFile {
    /// Create a view with the cursor at the start.
    pub fn new(content: Arc<[u8]>) -> Self {
        let end = content.len().saturating_sub(1);
        Self {
            content,
            position: 0,
            end,
        }
    }

    /// Shared bytes backing this view.
    pub fn content(&self) -> &Arc<[u8]> {
        &self.content
    }

    /// Logical end offset.
    pub fn end(&self) -> usize {
        self.end
    }

    /// Move the cursor and return the new position, clamped into `[0, end]`.
    pub fn seek(&mut self, offset: i64, whence: Whence) -> usize {
        let base = match whence {
            Whence::Start => 0,
            Whence::Current => self.position as i64,
            Whence::End => self.end as i64,
        };
        let target = base.saturating_add(offset);
        self.position = target.clamp(0, self.end as i64) as usize;
        self.position
    }

    /// Current cursor position.
    pub fn tell(&self) -> usize {
        self.position
    }

    /// Bytes from the cursor up to `min(position + size, end)`, or up to `end`
    /// when `size` is `None`. The cursor does not move.
    pub fn read(&self, size: Option<usize>) -> &[u8] {
        let start = self.position;
        let stop = match size {
            Some(size) => start.saturating_add(size).min(self.end),
            None => self.end,
        };
        &self.content[start..stop.max(start)]
    }

    /// Always true: `seek` works over the whole buffer.
    pub fn seekable(&self) -> bool {
        true
    }

    /// Always true, though `read` never advances the cursor.
    pub fn readable(&self) -> bool {
        true
    }

    /// In-memory buffers have no file descriptor.
    pub fn fileno(&self) -> io::Result<i32> {
        Err(io::Error::new(
            io::ErrorKind::Unsupported,
            "in-memory font buffer has no file descriptor",
        ))
    }
}

impl io::Seek for FontFile {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        let position = match pos {
            SeekFrom::Start(offset) => {
                FontFile::seek(self, i64::try_from(offset).unwrap_or(i64::MAX), Whence::Start)
            }
            SeekFrom::Current(offset) => FontFile::seek(self, offset, Whence::Current),
            SeekFrom::End(offset) => FontFile::seek(self, offset, Whence::End),
        };
        Ok(position as u64)
    }
}

impl io::Write for FontFile {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(
            io::ErrorKind::Unsupported,
            "font buffer is read-only",
        ))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
