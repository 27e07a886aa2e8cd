//! Lazy, per-file stream of decoded telemetry samples.

use std::path::Path;

use time::PrimitiveDateTime;

use crate::{errors::GpsError, mp4::Mp4, offset::Offset, record::GpsSample};

/// Iterator over the telemetry records of one MP4 file, in table order.
///
/// Owns the file handle for the duration of the iteration; the handle
/// is closed exactly once when the iterator is dropped, on every exit
/// path. Each input file gets its own `SampleIter`.
///
/// Errors from [`SampleIter::open`] mean the file's metadata could not
/// be located (recoverable per file); errors yielded by the iterator
/// mean a corrupt record (fatal for the run). See
/// [`GpsError::is_recoverable`].
pub struct SampleIter {
    mp4: Mp4,
    creation_time: PrimitiveDateTime,
    offsets: std::vec::IntoIter<Offset>,
}

impl SampleIter {
    /// Opens `path` and runs the initialization phase: locate the
    /// container creation time, then the telemetry offset table.
    /// No record is decoded until the iterator is pulled.
    pub fn open(path: &Path) -> Result<Self, GpsError> {
        let mut mp4 = Mp4::new(path)?;
        let creation_time = mp4.creation_time()?;
        let offsets = mp4.offsets()?;
        Ok(Self {
            mp4,
            creation_time,
            offsets: offsets.into_iter(),
        })
    }

    /// Container creation time recovered from the movie header, UTC.
    pub fn creation_time(&self) -> PrimitiveDateTime {
        self.creation_time
    }
}

impl Iterator for SampleIter {
    type Item = Result<GpsSample, GpsError>;

    /// Decodes exactly one record per pull.
    fn next(&mut self) -> Option<Self::Item> {
        let offset = self.offsets.next()?;
        Some(self.mp4.sample_at(offset.position))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.offsets.size_hint()
    }
}

impl ExactSizeIterator for SampleIter {}
