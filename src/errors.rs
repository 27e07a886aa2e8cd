//! Telemetry extraction errors.

use std::fmt;

/// Read/parse errors for GPS telemetry embedded in MP4 files.
#[derive(Debug)]
pub enum GpsError {
    /// Converted `binrw` error.
    BinReadError(binrw::Error),
    /// Converted `Utf8Error`.
    Utf8Error(std::string::FromUtf8Error),
    /// IO error.
    IOError(std::io::Error),
    /// Read fewer bytes than requested,
    /// e.g. for truncated files.
    ReadMismatch { got: u64, expected: u64 },
    /// Expected byte signature absent from the scanned window.
    MagicNotFound { magic: &'static str },
    /// Offset-table entry declares the wrong block size.
    SizeMismatch { got: u32, expected: u32 },
    /// Record header bytes do not match the fixed template.
    HeaderMismatch { offset: u32, got: Vec<u8> },
    /// Record timestamp field does not fit a calendar component.
    InvalidTimestamp { field: &'static str, value: u32 },
    /// Converted `time` range error for calendar components.
    ComponentRange(time::error::ComponentRange),
    /// Converted `time` formatting error.
    FormatError(time::error::Format),
    /// File too small to hold the trailing offset table.
    UnexpectedFileSize(u64),
}

impl GpsError {
    /// Whether this error merely means the file's trailing metadata
    /// could not be located (recoverable: skip the file, keep going),
    /// as opposed to a corrupt telemetry record (fatal for the run).
    pub fn is_recoverable(&self) -> bool {
        !matches!(
            self,
            Self::HeaderMismatch { .. }
                | Self::InvalidTimestamp { .. }
                | Self::ComponentRange(_)
        )
    }
}

impl std::error::Error for GpsError {}

impl fmt::Display for GpsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GpsError::BinReadError(err) => write!(f, "{err}"),
            GpsError::Utf8Error(err) => write!(f, "{err}"),
            GpsError::IOError(err) => write!(f, "IO error: {err}"),
            GpsError::ReadMismatch { got, expected } => {
                write!(f, "Read {got} bytes, expected {expected} bytes.")
            }
            GpsError::MagicNotFound { magic } => {
                write!(f, "No '{magic}' signature in scanned range.")
            }
            GpsError::SizeMismatch { got, expected } => {
                write!(f, "Offset-table entry declares block size {got}, expected {expected}.")
            }
            GpsError::HeaderMismatch { offset, got } => {
                write!(f, "Record @ offset {offset} has unexpected header {got:02x?}.")
            }
            GpsError::InvalidTimestamp { field, value } => {
                write!(f, "Record timestamp {field} value {value} out of range.")
            }
            GpsError::ComponentRange(err) => write!(f, "{err}"),
            GpsError::FormatError(err) => write!(f, "{err}"),
            GpsError::UnexpectedFileSize(size) => {
                write!(f, "Unexpected file size of {size} bytes.")
            }
        }
    }
}

/// Converts std::io::Error to GpsError
impl From<std::io::Error> for GpsError {
    fn from(err: std::io::Error) -> Self {
        GpsError::IOError(err)
    }
}

/// Converts std::string::FromUtf8Error to GpsError
impl From<std::string::FromUtf8Error> for GpsError {
    fn from(err: std::string::FromUtf8Error) -> GpsError {
        GpsError::Utf8Error(err)
    }
}

/// Converts binrw::Error to GpsError
impl From<binrw::Error> for GpsError {
    fn from(err: binrw::Error) -> GpsError {
        GpsError::BinReadError(err)
    }
}

/// Converts time::error::ComponentRange to GpsError
impl From<time::error::ComponentRange> for GpsError {
    fn from(err: time::error::ComponentRange) -> GpsError {
        GpsError::ComponentRange(err)
    }
}

/// Converts time::error::Format to GpsError
impl From<time::error::Format> for GpsError {
    fn from(err: time::error::Format) -> GpsError {
        GpsError::FormatError(err)
    }
}

/// Converts GpsError to std::io::Error
impl From<GpsError> for std::io::Error {
    fn from(err: GpsError) -> Self {
        std::io::Error::new(std::io::ErrorKind::Other, err)
    }
}
