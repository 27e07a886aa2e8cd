use time::{self, Month, PrimitiveDateTime};

/// Literal signature of the media-data atom (`mdat`).
/// Searched for within the first [`HEAD_SCAN_SIZE`] bytes of the file;
/// the big-endian `u32` directly before it is the atom's total size.
pub const MDAT: &[u8] = b"mdat";

/// Literal signature of the movie-header atom (`mvhd`).
pub const MVHD: &[u8] = b"mvhd";

/// Literal signature of the vendor-private offset table,
/// located within the last [`TABLE_BLOCK_SIZE`] bytes of the file.
pub const GPS_MARKER: &[u8] = b"pgps";

/// The full marker tag on disk is `"pgps "`, trailing space included.
pub const GPS_MARKER_TAG_SIZE: usize = 5;

/// Scan window at the start of the file for locating `mdat`.
pub const HEAD_SCAN_SIZE: usize = 0x2000;

/// Scan window for locating `mvhd` after skipping the media payload.
pub const MVHD_SCAN_SIZE: usize = 0x100;

/// Byte offset of the raw creation time relative to the `mvhd`
/// signature (one version byte and three flag bytes follow the FourCC).
pub const CREATION_TIME_OFFSET: usize = 8;

/// Size of the trailing offset-table block, and the block size
/// every table entry must declare.
pub const TABLE_BLOCK_SIZE: u32 = 0x8000;

/// Size of one telemetry record.
pub const RECORD_SIZE: usize = 0x80;

/// Fixed header template every record must start with:
/// the `freeGPS X` signature padded with zero bytes to 0x30 bytes.
pub const RECORD_HEADER: [u8; 0x30] = [
    0x00, 0x00, 0x80, 0x00, b'f', b'r', b'e', b'e', b'G', b'P', b'S', b' ', b'X', 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
];

/// Byte offset of the six timestamp fields within a record.
pub const RECORD_TIME_OFFSET: usize = 0x30;

/// Byte offset of the 3-character status code within a record.
pub const RECORD_STATUS_OFFSET: usize = 0x48;

/// Byte offset of the position/velocity fields within a record.
pub const RECORD_POSITION_OFFSET: usize = 0x4c;

/// Byte offset of the raw sensor payload within a record.
pub const RECORD_PAYLOAD_OFFSET: usize = 0x5c;

/// Size of the raw sensor payload.
pub const RECORD_PAYLOAD_SIZE: usize = 28;

/// Status code denoting "no GPS fix".
pub const STATUS_NO_FIX: &str = "A00";

/// Seconds between MP4 time zero (1904-01-01) and the Unix epoch
/// (1970-01-01): 66 years, 17 of them leap years.
pub const MP4_TO_UNIX_EPOCH_OFFSET: i64 = 86_400 * (66 * 365 + 17);

/// Time zero for MP4 containers. Midnight January 1, 1904.
pub fn mp4_time_zero() -> PrimitiveDateTime {
    time::Date::from_calendar_date(1904, Month::January, 1).unwrap()
        .with_hms_milli(0, 0, 0, 0).unwrap()
}
