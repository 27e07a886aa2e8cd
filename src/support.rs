/// Converts a coordinate in DDMM.mmmm units (degrees * 100 + minutes)
/// to decimal degrees. The whole-degree part is truncated, not
/// floored, matching device output conventions.
pub(crate) fn ddmm_to_degrees(value: f64) -> f64 {
    let degrees = (value / 100.0).trunc();
    degrees + (value - degrees * 100.0) / 60.0
}

/// Strips trailing zero bytes.
pub(crate) fn trim_trailing_zeros(bytes: &[u8]) -> &[u8] {
    let end = bytes.iter().rposition(|b| *b != 0).map_or(0, |i| i + 1);
    &bytes[..end]
}
