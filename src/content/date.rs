//! Date parsing for front-matter values and file names

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref TIMESTAMP: Regex = Regex::new(r"(\d{4})-(\d{2})-(\d{2})").unwrap();
}

/// Parse a front-matter date string in various formats
///
/// Values without an offset are interpreted in local time.
pub fn parse_date_string(s: &str) -> Option<DateTime<Local>> {
    let s = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Local));
    }

    let datetime_formats = [
        "%Y-%m-%d %H:%M:%S",
        "%Y/%m/%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y/%m/%d %H:%M",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
    ];
    for fmt in datetime_formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return local(dt);
        }
    }

    for fmt in ["%Y-%m-%d", "%Y/%m/%d"] {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return local(d.and_hms_opt(0, 0, 0)?);
        }
    }

    None
}

/// Find the first `YYYY-MM-DD` in `text` and turn it into local midnight
///
/// A match that is not a real calendar day (`2023-13-45`) yields `None`.
pub fn date_in(text: &str) -> Option<DateTime<Local>> {
    let caps = TIMESTAMP.captures(text)?;
    let year = caps[1].parse().ok()?;
    let month = caps[2].parse().ok()?;
    let day = caps[3].parse().ok()?;
    let date = NaiveDate::from_ymd_opt(year, month, day)?;
    local(date.and_hms_opt(0, 0, 0)?)
}

fn local(dt: NaiveDateTime) -> Option<DateTime<Local>> {
    Local.from_local_datetime(&dt).earliest()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    #[test]
    fn test_parse_date_formats() {
        for s in [
            "2024-01-15",
            "2024/01/15",
            "2024-01-15 10:30:00",
            "2024-01-15 10:30",
            "2024-01-15T10:30:00",
        ] {
            let dt = parse_date_string(s).unwrap_or_else(|| panic!("failed on {s}"));
            assert_eq!(dt.format("%Y-%m-%d").to_string(), "2024-01-15");
        }
    }

    #[test]
    fn test_parse_rfc3339() {
        let dt = parse_date_string("2024-01-15T10:30:00Z").unwrap();
        assert_eq!(dt, DateTime::parse_from_rfc3339("2024-01-15T10:30:00Z").unwrap());
    }

    #[test]
    fn test_parse_garbage() {
        assert!(parse_date_string("last tuesday").is_none());
    }

    #[test]
    fn test_date_in_filename() {
        let dt = date_in("2023-05-01-hello").unwrap();
        assert_eq!((dt.year(), dt.month(), dt.day()), (2023, 5, 1));
    }

    #[test]
    fn test_date_in_rejects_impossible_day() {
        assert!(date_in("2023-13-45-oops").is_none());
        assert!(date_in("hello").is_none());
    }
}
