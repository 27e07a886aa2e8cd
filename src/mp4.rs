//! Core MP4 struct and methods.
//!
//! This is not a general ISO-BMFF parser. Dash-camera firmware leaves
//! the structures we need at fixed, findable places, so the two atoms
//! involved (`mdat`, `mvhd`) are located by literal byte search rather
//! than by walking the atom tree, and the telemetry offset table is a
//! vendor-private block at the very end of the file.

use std::{fs::File, io::SeekFrom, path::Path};

use binrw::BinReaderExt;
use time::{Duration, PrimitiveDateTime};
use tracing::debug;

use crate::{
    consts::{
        mp4_time_zero, CREATION_TIME_OFFSET, GPS_MARKER, GPS_MARKER_TAG_SIZE, HEAD_SCAN_SIZE,
        MDAT, MVHD, MVHD_SCAN_SIZE, RECORD_SIZE, TABLE_BLOCK_SIZE,
    },
    errors::GpsError,
    offset::{Offset, Offsets},
    reader::{find, Mp4Reader},
    record::GpsSample,
};

/// Open MP4 file.
pub struct Mp4 {
    reader: Mp4Reader,
}

impl Mp4 {
    /// New Mp4 from path.
    pub fn new(path: &Path) -> Result<Self, GpsError> {
        let file = File::open(path)?;
        Ok(Self {
            reader: Mp4Reader::new(file)?,
        })
    }

    /// Returns MP4 file size in bytes.
    pub fn len(&self) -> u64 {
        self.reader.len
    }

    pub fn is_empty(&self) -> bool {
        self.reader.len == 0
    }

    /// Container creation time from the `mvhd` atom, UTC.
    ///
    /// Locates `mdat` in the head of the file, skips past the media
    /// payload via the atom's declared size, then scans the trailing
    /// metadata for `mvhd`. The raw value counts seconds since
    /// 1904-01-01 (see [`mp4_time_zero`]).
    pub fn creation_time(&mut self) -> Result<PrimitiveDateTime, GpsError> {
        self.reader.seek_to(0)?;
        let head = self.reader.bytes_up_to(HEAD_SCAN_SIZE)?;
        let sig = find(&head, MDAT).ok_or(GpsError::MagicNotFound { magic: "mdat" })?;
        let size_at = sig.checked_sub(4).ok_or(GpsError::MagicNotFound { magic: "mdat" })?;
        let atom_size: u32 = std::io::Cursor::new(&head[size_at..sig]).read_be()?;

        // 'sig + atom_size' lands just past the media payload,
        // at the FourCC of the following atom.
        self.reader.seek_to(sig as u64 + u64::from(atom_size))?;
        let tail = self.reader.bytes_up_to(MVHD_SCAN_SIZE)?;
        let sig = find(&tail, MVHD).ok_or(GpsError::MagicNotFound { magic: "mvhd" })?;

        let mut cursor = std::io::Cursor::new(tail);
        cursor.set_position((sig + CREATION_TIME_OFFSET) as u64);
        let raw: u32 = cursor.read_be()?;
        debug!(raw, "mvhd creation time");

        Ok(mp4_time_zero() + Duration::seconds(i64::from(raw)))
    }

    /// Telemetry record offsets from the vendor-private table
    /// in the last [`TABLE_BLOCK_SIZE`] bytes of the file.
    ///
    /// The table header declares an entry count, but entries are
    /// decoded in 8-byte strides to the end of the block instead,
    /// matching observed device output. Every entry must declare
    /// a block size of [`TABLE_BLOCK_SIZE`].
    pub fn offsets(&mut self) -> Result<Offsets, GpsError> {
        let block = u64::from(TABLE_BLOCK_SIZE);
        if self.reader.len < block {
            return Err(GpsError::UnexpectedFileSize(self.reader.len));
        }
        self.reader.seek(SeekFrom::End(-(block as i64)))?;
        let buf = self.reader.bytes(TABLE_BLOCK_SIZE as usize)?;
        let sig = find(&buf, GPS_MARKER).ok_or(GpsError::MagicNotFound { magic: "pgps" })?;
        let table = &buf[sig + GPS_MARKER_TAG_SIZE..];

        let mut cursor = std::io::Cursor::new(table);
        let _reserved: u32 = cursor.read_be()?;
        let declared: u32 = cursor.read_be()?;

        let mut entries = Vec::new();
        for chunk in table[8..].chunks_exact(8) {
            let mut cursor = std::io::Cursor::new(chunk);
            let position: u32 = cursor.read_be()?;
            let size: u32 = cursor.read_be()?;
            if size != TABLE_BLOCK_SIZE {
                return Err(GpsError::SizeMismatch {
                    got: size,
                    expected: TABLE_BLOCK_SIZE,
                });
            }
            entries.push(Offset { position, size });
        }
        debug!(declared, parsed = entries.len(), "gps offset table");

        Ok(Offsets(entries))
    }

    /// Reads and decodes the telemetry record at `position`.
    pub fn sample_at(&mut self, position: u32) -> Result<GpsSample, GpsError> {
        self.reader.seek_to(u64::from(position))?;
        let buf = self.reader.bytes(RECORD_SIZE)?;
        GpsSample::from_bytes(&buf, position)
    }
}
