//! Date helper functions

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::error::{ContentError, Result};

/// Parse an ISO-8601 date or timestamp as exported by the CMS
///
/// Timestamps with an offset keep their local wall-clock time, so the
/// calendar date is the one the author saw.
///
/// # Examples
/// ```ignore
/// parse_iso8601("2024-01-05")           // -> 2024-01-05T00:00:00
/// parse_iso8601("2024-01-05T09:30:00Z") // -> 2024-01-05T09:30:00
/// ```
pub fn parse_iso8601(s: &str) -> Result<NaiveDateTime> {
    let s = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.naive_local());
    }

    let datetime_formats = [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S",
    ];
    for fmt in datetime_formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(dt);
        }
    }

    for fmt in ["%Y-%m-%d", "%Y%m%d"] {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            if let Some(dt) = d.and_hms_opt(0, 0, 0) {
                return Ok(dt);
            }
        }
    }

    Err(ContentError::InvalidDate {
        value: s.to_string(),
    })
}

/// Format the calendar date part as `YYYY-MM-DD`
pub fn format_ymd(date: &NaiveDateTime) -> String {
    date.format("%Y-%m-%d").to_string()
}
