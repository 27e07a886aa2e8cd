//! Extract GPS/time telemetry embedded by dash-camera firmware in
//! MP4-family containers, and render it as tab-separated text or as a
//! GPX 1.1 track.
//!
//! Does not and will not implement a general ISO-BMFF parser: the two
//! atoms involved are located by literal byte search, and the record
//! offsets come from a vendor-private table at the end of the file.
//!
//! ```rs
//! use mp4gps::SampleIter;
//! use std::path::Path;
//!
//! fn main() -> std::io::Result<()> {
//!     let samples = SampleIter::open(Path::new("VIDEO.MP4"))?;
//!
//!     println!("created {}", samples.creation_time());
//!
//!     for sample in samples {
//!         println!("{:?}", sample?);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod consts;
pub mod errors;
pub mod export;
pub mod iterator;
pub mod mp4;
pub mod offset;
pub mod record;

// Internal reader and helpers
pub(crate) mod reader;
pub(crate) mod support;

pub use consts::{mp4_time_zero, RECORD_SIZE, STATUS_NO_FIX, TABLE_BLOCK_SIZE};
pub use errors::GpsError;
pub use export::{GpxExporter, TextExporter};
pub use iterator::SampleIter;
pub use mp4::Mp4;
pub use offset::{Offset, Offsets};
pub use record::GpsSample;
