//! One fixed-layout telemetry record: timestamp, position, velocity,
//! heading, fix status, and the raw sensor payload.
//!
//! Records are 0x80 bytes. The first 0x30 bytes are a fixed header
//! template; all remaining fields are little endian, unlike the
//! surrounding container structures.

use std::io::Cursor;

use binrw::{BinRead, BinReaderExt};
use time::{Date, Month, PrimitiveDateTime};

use crate::{
    consts::{
        RECORD_HEADER, RECORD_PAYLOAD_OFFSET, RECORD_PAYLOAD_SIZE, RECORD_SIZE,
        RECORD_TIME_OFFSET, STATUS_NO_FIX,
    },
    errors::GpsError,
    support::ddmm_to_degrees,
};

/// Record fields following the fixed header, starting at byte 0x30.
///
/// The five trailing integers are undocumented vendor fields; their
/// bytes double as the head of the sensor payload.
#[derive(Debug, BinRead)]
#[br(little)]
struct RawRecord {
    hour: u32,
    minute: u32,
    second: u32,
    /// Years since 2000.
    year: u32,
    month: u32,
    day: u32,
    status: [u8; 3],
    _pad: u8,
    latitude: f32,
    longitude: f32,
    speed: f32,
    heading: f32,
    extra: [i32; 5],
}

impl RawRecord {
    fn datetime(&self) -> Result<PrimitiveDateTime, GpsError> {
        let month = Month::try_from(narrow("month", self.month)?)?;
        let date = Date::from_calendar_date(self.year as i32 + 2000, month, narrow("day", self.day)?)?;
        Ok(date.with_hms(
            narrow("hour", self.hour)?,
            narrow("minute", self.minute)?,
            narrow("second", self.second)?,
        )?)
    }
}

fn narrow(field: &'static str, value: u32) -> Result<u8, GpsError> {
    u8::try_from(value).map_err(|_| GpsError::InvalidTimestamp { field, value })
}

/// One decoded GPS/time/sensor sample. Immutable once decoded.
#[derive(Debug, Clone, PartialEq)]
pub struct GpsSample {
    /// Record timestamp, UTC.
    pub datetime: PrimitiveDateTime,
    /// Latitude in DDMM.mmmm units (degrees * 100 + minutes).
    pub latitude: f32,
    /// Longitude in DDMM.mmmm units (degrees * 100 + minutes).
    pub longitude: f32,
    pub speed: f32,
    pub heading: f32,
    /// Undocumented vendor fields.
    pub extra: [i32; 5],
    /// 3-character fix status code, e.g. `A00` for "no fix".
    pub status: String,
    /// Raw sensor payload, retained verbatim.
    pub payload: [u8; RECORD_PAYLOAD_SIZE],
}

impl GpsSample {
    /// Decodes one record from its raw 0x80 bytes.
    /// `position` is the record's file offset, used for error context.
    pub fn from_bytes(buf: &[u8], position: u32) -> Result<Self, GpsError> {
        if buf.len() < RECORD_SIZE {
            return Err(GpsError::ReadMismatch {
                got: buf.len() as u64,
                expected: RECORD_SIZE as u64,
            });
        }
        if buf[..RECORD_HEADER.len()] != RECORD_HEADER {
            return Err(GpsError::HeaderMismatch {
                offset: position,
                got: buf[..RECORD_HEADER.len()].to_vec(),
            });
        }

        let raw: RawRecord = Cursor::new(&buf[RECORD_TIME_OFFSET..]).read_le()?;
        let datetime = raw.datetime()?;
        let status = String::from_utf8(raw.status.to_vec())?;

        let mut payload = [0_u8; RECORD_PAYLOAD_SIZE];
        payload.copy_from_slice(
            &buf[RECORD_PAYLOAD_OFFSET..RECORD_PAYLOAD_OFFSET + RECORD_PAYLOAD_SIZE],
        );

        Ok(Self {
            datetime,
            latitude: raw.latitude,
            longitude: raw.longitude,
            speed: raw.speed,
            heading: raw.heading,
            extra: raw.extra,
            status,
            payload,
        })
    }

    /// Latitude in decimal degrees.
    pub fn latitude_deg(&self) -> f64 {
        ddmm_to_degrees(f64::from(self.latitude))
    }

    /// Longitude in decimal degrees.
    pub fn longitude_deg(&self) -> f64 {
        ddmm_to_degrees(f64::from(self.longitude))
    }

    /// Whether the sample has a GPS fix.
    pub fn has_fix(&self) -> bool {
        self.status != STATUS_NO_FIX
    }
}
