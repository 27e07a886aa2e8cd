use std::{
    fs::File,
    io::{BufReader, Cursor, Read, Seek, SeekFrom},
};

use crate::errors::GpsError;

/// `BufReader` over an open file, with the file size cached
/// to avoid repeated sys calls.
///
/// Typed reads are done at call sites via `binrw::BinReaderExt`
/// on the cursors returned here.
#[derive(Debug)]
pub(crate) struct Mp4Reader {
    /// File size in bytes.
    pub(crate) len: u64,
    inner: BufReader<File>,
}

impl Mp4Reader {
    pub(crate) fn new(file: File) -> Result<Self, GpsError> {
        let len = file.metadata()?.len();
        Ok(Self {
            len,
            inner: BufReader::new(file),
        })
    }

    /// Seeks to position `pos`.
    pub(crate) fn seek(&mut self, pos: SeekFrom) -> Result<u64, GpsError> {
        Ok(self.inner.seek(pos)?)
    }

    /// Seeks to absolute position `pos` from the start of the file.
    pub(crate) fn seek_to(&mut self, pos: u64) -> Result<u64, GpsError> {
        self.seek(SeekFrom::Start(pos))
    }

    /// Reads exactly `len` bytes at current position.
    pub(crate) fn bytes(&mut self, len: usize) -> Result<Vec<u8>, GpsError> {
        let mut buf = Vec::with_capacity(len);
        let got = self.inner.by_ref().take(len as u64).read_to_end(&mut buf)? as u64;
        if got != len as u64 {
            return Err(GpsError::ReadMismatch {
                got,
                expected: len as u64,
            });
        }
        Ok(buf)
    }

    /// Reads up to `len` bytes at current position.
    /// Used for scan windows, where hitting end of file
    /// simply shortens the window.
    pub(crate) fn bytes_up_to(&mut self, len: usize) -> Result<Vec<u8>, GpsError> {
        let mut buf = Vec::with_capacity(len);
        self.inner.by_ref().take(len as u64).read_to_end(&mut buf)?;
        Ok(buf)
    }

    /// Reads exactly `len` bytes into a `Cursor<Vec<u8>>`.
    pub(crate) fn cursor(&mut self, len: usize) -> Result<Cursor<Vec<u8>>, GpsError> {
        Ok(Cursor::new(self.bytes(len)?))
    }
}

/// Returns the index of the first occurrence of `needle` in `haystack`.
pub(crate) fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}
