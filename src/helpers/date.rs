//! Post date parsing

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref CANONICAL_DATE: Regex = Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap();
}

const DATETIME_FORMATS: [&str; 6] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y/%m/%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
];

const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%Y/%m/%d"];

/// Parse a front-matter date into a point in time.
///
/// Date-only values resolve to midnight. Offsets are folded into UTC so that
/// ordering does not depend on the local timezone. Returns `None` for anything
/// that is not a real calendar date.
pub fn parse_post_date(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return d.and_hms_opt(0, 0, 0);
        }
    }

    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }

    // RFC 3339 / ISO 8601 with offset
    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.naive_utc())
}

/// Whether `s` has the `YYYY-MM-DD` shape posts are expected to use
pub fn is_canonical_date(s: &str) -> bool {
    CANONICAL_DATE.is_match(s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date_only() {
        let dt = parse_post_date("2024-06-01").unwrap();
        assert_eq!(dt.format("%Y-%m-%d %H:%M").to_string(), "2024-06-01 00:00");
    }

    #[test]
    fn test_parse_datetime_variants() {
        assert!(parse_post_date("2024-01-15 10:30:00").is_some());
        assert!(parse_post_date("2024/01/15").is_some());
        assert!(parse_post_date("2024-01-15T10:30:00").is_some());

        let utc = parse_post_date("2024-01-15T10:30:00+02:00").unwrap();
        assert_eq!(utc.format("%H:%M").to_string(), "08:30");
    }

    #[test]
    fn test_parse_invalid() {
        assert_eq!(parse_post_date(""), None);
        assert_eq!(parse_post_date("yesterday"), None);
        assert_eq!(parse_post_date("2024-02-30"), None);
        assert_eq!(parse_post_date("2024-13-01"), None);
    }

    #[test]
    fn test_canonical_date() {
        assert!(is_canonical_date("2024-01-15"));
        assert!(!is_canonical_date("2024-1-15"));
        assert!(!is_canonical_date("2024/01/15"));
        assert!(!is_canonical_date("2024-01-15 10:00"));
    }
}
