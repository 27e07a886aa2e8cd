//! Sample output: GPX 1.1 tracks and tab-separated text.

use std::io::Write;

use time::{format_description::well_known::Rfc3339, PrimitiveDateTime};

use crate::{errors::GpsError, record::GpsSample, support::trim_trailing_zeros};

const GPX_PREAMBLE: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="no" ?>

<gpx xmlns="http://www.topografix.com/GPX/1/1" version="1.1" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance" xsi:schemaLocation="http://www.topografix.com/GPX/1/1 http://www.topografix.com/GPX/1/1/gpx.xsd">
  <trk>"#;

/// GPX 1.1 track writer.
///
/// Samples are grouped into track segments by fix status: a sample
/// without a fix closes the current segment (if any) and is dropped,
/// the next sample with a fix opens a new one. One document wraps
/// everything written between construction and [`GpxExporter::finish`],
/// which also closes a dangling segment.
pub struct GpxExporter<W: Write> {
    out: W,
    in_segment: bool,
}

impl<W: Write> GpxExporter<W> {
    /// Writes the document preamble and opens the track.
    pub fn new(mut out: W) -> Result<Self, GpsError> {
        writeln!(out, "{GPX_PREAMBLE}")?;
        Ok(Self {
            out,
            in_segment: false,
        })
    }

    /// Feeds one sample through the segmentation machine.
    pub fn sample(&mut self, sample: &GpsSample) -> Result<(), GpsError> {
        if !self.in_segment {
            if !sample.has_fix() {
                return Ok(());
            }
            writeln!(self.out, "    <trkseg>")?;
            self.in_segment = true;
        } else if !sample.has_fix() {
            writeln!(self.out, "    </trkseg>")?;
            self.in_segment = false;
            return Ok(());
        }

        writeln!(
            self.out,
            "      <trkpt lat=\"{:.6}\" lon=\"{:.6}\">",
            sample.latitude_deg(),
            sample.longitude_deg(),
        )?;
        writeln!(self.out, "        <time>{}</time>", iso8601(&sample.datetime)?)?;
        writeln!(self.out, "      </trkpt>")?;
        Ok(())
    }

    /// Closes a dangling segment and the document,
    /// returning the writer.
    pub fn finish(mut self) -> Result<W, GpsError> {
        if self.in_segment {
            writeln!(self.out, "    </trkseg>")?;
        }
        writeln!(self.out, "  </trk>")?;
        writeln!(self.out, "</gpx>")?;
        Ok(self.out)
    }
}

/// Tab-separated text writer: one `#` header line per file,
/// then one line per sample.
pub struct TextExporter<W: Write> {
    out: W,
}

impl<W: Write> TextExporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Header line with the file's creation time.
    pub fn header(&mut self, creation_time: &PrimitiveDateTime) -> Result<(), GpsError> {
        writeln!(self.out, "# {}", iso8601(creation_time)?)?;
        Ok(())
    }

    /// One line: timestamp, floats at fixed precision, vendor
    /// integers, status code, then the sensor payload hex-encoded
    /// with trailing zero bytes stripped.
    pub fn sample(&mut self, sample: &GpsSample) -> Result<(), GpsError> {
        let dt = &sample.datetime;
        write!(
            self.out,
            "{:04}-{:02}-{:02} {:02}:{:02}:{:02} ",
            dt.year(),
            u8::from(dt.month()),
            dt.day(),
            dt.hour(),
            dt.minute(),
            dt.second(),
        )?;
        write!(
            self.out,
            "{:.6} {:.6} {:.6} {:.6}",
            sample.latitude, sample.longitude, sample.speed, sample.heading,
        )?;
        for value in &sample.extra {
            write!(self.out, " {value}")?;
        }
        write!(self.out, " {}\t#", sample.status)?;
        for (i, byte) in trim_trailing_zeros(&sample.payload).iter().enumerate() {
            if i > 0 {
                write!(self.out, " ")?;
            }
            write!(self.out, "{byte:02x}")?;
        }
        writeln!(self.out)?;
        Ok(())
    }
}

fn iso8601(datetime: &PrimitiveDateTime) -> Result<String, GpsError> {
    Ok(datetime.assume_utc().format(&Rfc3339)?)
}
