use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use tracing::warn;

use crate::models::YearMonth;

/// Naive formats accepted after RFC 3339 fails. Values are read as UTC.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
];

/// Offset formats that RFC 3339 rejects, e.g. `"2024-01-05 10:00:00+0000"`.
const OFFSET_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f%z", "%Y-%m-%d %H:%M:%S%z"];

/// Parse a timestamp string into a UTC [`DateTime`].
///
/// Accepts RFC 3339 (with `Z` or any fixed offset), space-separated
/// variants with a numeric offset, naive date-times (interpreted as UTC) and bare
/// `YYYY-MM-DD` dates (midnight UTC). Returns `None` for empty strings or
/// unrecognised formats.
pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    for fmt in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(s, fmt) {
            return Some(dt.with_timezone(&Utc));
        }
    }

    for fmt in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(naive.and_utc());
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc());
    }

    warn!("could not parse timestamp \"{}\"", s);
    None
}

/// `"YYYY-MM to YYYY-MM"` covering the earliest and latest instants.
///
/// Returns `None` when `timestamps` is empty.
pub fn month_range<'a, I>(timestamps: I) -> Option<String>
where
    I: IntoIterator<Item = &'a DateTime<Utc>>,
{
    let mut iter = timestamps.into_iter();
    let first = iter.next()?;
    let (min, max) = iter.fold((first, first), |(lo, hi), ts| (lo.min(ts), hi.max(ts)));
    Some(format!(
        "{} to {}",
        YearMonth::from_datetime(min),
        YearMonth::from_datetime(max)
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn utc(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, s).unwrap()
    }

    #[test]
    fn test_parse_timestamp_z_suffix() {
        assert_eq!(
            parse_timestamp("2024-01-15T10:30:00Z"),
            Some(utc(2024, 1, 15, 10, 30, 0))
        );
    }

    #[test]
    fn test_parse_timestamp_with_offset() {
        assert_eq!(
            parse_timestamp("2024-01-15T10:30:00+02:00"),
            Some(utc(2024, 1, 15, 8, 30, 0))
        );
    }

    #[test]
    fn test_parse_timestamp_space_separated_offset() {
        assert_eq!(
            parse_timestamp("2024-01-15 10:30:00+0000"),
            Some(utc(2024, 1, 15, 10, 30, 0))
        );
    }

    #[test]
    fn test_parse_timestamp_naive_is_utc() {
        assert_eq!(
            parse_timestamp("2024-01-15 10:30:00.250"),
            Some(utc(2024, 1, 15, 10, 30, 0) + chrono::Duration::milliseconds(250))
        );
        assert_eq!(
            parse_timestamp("2024-01-15T10:30:00"),
            Some(utc(2024, 1, 15, 10, 30, 0))
        );
    }

    #[test]
    fn test_parse_timestamp_bare_date() {
        assert_eq!(parse_timestamp("2023-11-02"), Some(utc(2023, 11, 2, 0, 0, 0)));
    }

    #[test]
    fn test_parse_timestamp_empty_returns_none() {
        assert!(parse_timestamp("").is_none());
        assert!(parse_timestamp("   ").is_none());
    }

    #[test]
    fn test_parse_timestamp_garbage_returns_none() {
        assert!(parse_timestamp("last tuesday").is_none());
    }

    #[test]
    fn test_month_range() {
        let stamps = [
            utc(2024, 3, 1, 0, 0, 0),
            utc(2023, 12, 31, 23, 59, 59),
            utc(2024, 7, 4, 12, 0, 0),
        ];
        assert_eq!(month_range(&stamps).as_deref(), Some("2023-12 to 2024-07"));
    }

    #[test]
    fn test_month_range_empty() {
        let stamps: [DateTime<Utc>; 0] = [];
        assert!(month_range(&stamps).is_none());
    }
}
