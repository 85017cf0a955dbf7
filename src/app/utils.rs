// src/app/utils.rs
use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;

static SIZE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)([\d.]+)\s*(GB|MB|TB)").expect("size regex"));

/// Parse a release date into a calendar date.
///
/// Accepts `YYYY-MM-DD`, RFC 3339, `YYYY-MM-DDTHH:MM:SS[.fff]` and a bare `YYYY`.
pub(crate) fn parse_release_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(d);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_utc().date());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt.date());
    }
    if s.len() == 4 && s.bytes().all(|b| b.is_ascii_digit()) {
        let y: i32 = s.parse().ok()?;
        return NaiveDate::from_ymd_opt(y, 1, 1);
    }
    None
}

pub(crate) fn parse_release_year(s: &str) -> Option<i32> {
    parse_release_date(s).map(|d| d.year())
}

/// Midnight UTC of the release date, in milliseconds since the Unix epoch.
pub(crate) fn parse_release_timestamp_ms(s: &str) -> Option<i64> {
    parse_release_date(s)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc().timestamp_millis())
}

/// `"2.5 GB"` → 2.5, `"700 MB"` → ~0.68, `"1.2 TB"` → 1228.8. Anything else is `None`.
pub fn parse_size_to_gb(s: &str) -> Option<f64> {
    let caps = SIZE_RE.captures(s)?;
    let value: f64 = caps.get(1)?.as_str().parse().ok()?;
    let unit = caps.get(2)?.as_str().to_ascii_uppercase();
    match unit.as_str() {
        "GB" => Some(value),
        "MB" => Some(value / 1024.0),
        "TB" => Some(value * 1024.0),
        _ => None,
    }
}

/// Placeholder values that mean "nothing to show".
pub(crate) fn is_placeholder(value: &str) -> bool {
    matches!(value.trim(), "" | "N/A" | "n/a" | "None")
}

/// The labelled-field omission rule shared by cards and the detail view.
pub(crate) fn shown(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !is_placeholder(v))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn release_date_formats() {
        let d = NaiveDate::from_ymd_opt(2020, 9, 17).unwrap();
        assert_eq!(parse_release_date("2020-09-17"), Some(d));
        assert_eq!(parse_release_date("2020-09-17T10:00:00Z"), Some(d));
        assert_eq!(parse_release_date("2020-09-17T10:00:00"), Some(d));
        assert_eq!(parse_release_year("1998"), Some(1998));
        assert_eq!(parse_release_date("TBA"), None);
        assert_eq!(parse_release_date(""), None);
    }

    #[test]
    fn timestamps_order_by_day() {
        let a = parse_release_timestamp_ms("1970-01-02").unwrap();
        assert_eq!(a, 86_400_000);
        let b = parse_release_timestamp_ms("2001-05-01").unwrap();
        assert!(b > a);
    }

    #[test]
    fn sizes() {
        assert_eq!(parse_size_to_gb("2.5 GB"), Some(2.5));
        assert_eq!(parse_size_to_gb("512mb"), Some(0.5));
        assert_eq!(parse_size_to_gb("1 TB"), Some(1024.0));
        assert_eq!(parse_size_to_gb("Size: 3.2GB (compressed)"), Some(3.2));
        assert_eq!(parse_size_to_gb("N/A"), None);
        assert_eq!(parse_size_to_gb("12 KB"), None);
    }

    #[test]
    fn placeholders() {
        for v in ["", "N/A", "n/a", "None", "  "] {
            assert!(is_placeholder(v), "{v:?}");
        }
        assert!(!is_placeholder("none of the above"));
        assert_eq!(shown(Some("PC")), Some("PC"));
        assert_eq!(shown(Some("N/A")), None);
        assert_eq!(shown(None), None);
    }
}
