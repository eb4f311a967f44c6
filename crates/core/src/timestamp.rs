use crate::error::FormatError;
use chrono::NaiveDateTime;

pub const RAW_FORMAT: &str = "%Y:%m:%d %H:%M:%S";
pub const CANONICAL_FORMAT: &str = "%Y-%m-%d %H.%M.%S";

const RAW_LEN: usize = 19;

/// Converts an EXIF `DateTimeOriginal` value (`2012:01:02 20:01:49`) into the
/// file stem used for renaming (`2012-01-02 20.01.49`).
pub fn format_timestamp(raw: &str) -> Result<String, FormatError> {
    parse_raw(raw).map(|dt| dt.format(CANONICAL_FORMAT).to_string())
}

pub fn parse_raw(raw: &str) -> Result<NaiveDateTime, FormatError> {
    if !has_raw_shape(raw) {
        return Err(FormatError::Shape(raw.to_string()));
    }
    NaiveDateTime::parse_from_str(raw, RAW_FORMAT)
        .map_err(|_| FormatError::Calendar(raw.to_string()))
}

// chrono alone accepts single-digit fields and signed years, so the layout
// is pinned byte by byte first.
fn has_raw_shape(raw: &str) -> bool {
    let bytes = raw.as_bytes();
    if bytes.len() != RAW_LEN {
        return false;
    }
    bytes.iter().enumerate().all(|(i, b)| match i {
        4 | 7 | 13 | 16 => *b == b':',
        10 => *b == b' ',
        _ => b.is_ascii_digit(),
    })
}
