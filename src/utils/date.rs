// src/utils/date.rs

//! Timestamp normalization for listing fields.
//!
//! The listing API is inconsistent about how it spells dates. Values seen
//! in the wild include `2025-08-25 10:00:00.0`, `2025-08-25 10:00:00`,
//! `2025-08-25` and the occasional compact `20250825100000`.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

/// Date-time formats, in the order they are tried.
const DATETIME_FORMATS: [&str; 3] = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%d %H:%M:%S", "%Y%m%d%H%M%S"];

/// Date-only formats, tried after every date-time format fails.
const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%Y%m%d"];

/// Value that orders after every parseable timestamp.
pub const SENTINEL_MAX: NaiveDateTime = NaiveDateTime::MAX;

/// Parse a listing timestamp. Returns `None` for empty or unrecognized input.
///
/// No timezone conversion is performed; every value is naive local time.
pub fn parse_datetime(text: Option<&str>) -> Option<NaiveDateTime> {
    let text = text?.trim();
    if text.is_empty() {
        return None;
    }

    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
                .map(|date| date.and_time(NaiveTime::MIN))
        })
}

/// Resolve a sort key from an ordered list of candidate fields.
///
/// The first candidate that parses wins; if none do, the key is
/// [`SENTINEL_MAX`] so the record sorts last.
pub fn first_parsable<'a>(candidates: impl IntoIterator<Item = &'a str>) -> NaiveDateTime {
    candidates
        .into_iter()
        .find_map(|candidate| parse_datetime(Some(candidate)))
        .unwrap_or(SENTINEL_MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, s)
            .unwrap()
    }

    #[test]
    fn parses_fractional_seconds() {
        assert_eq!(
            parse_datetime(Some("2025-08-25 10:00:00.0")),
            Some(at(2025, 8, 25, 10, 0, 0))
        );
    }

    #[test]
    fn parses_whole_seconds_and_date_only() {
        assert_eq!(
            parse_datetime(Some("2025-08-25 10:30:15")),
            Some(at(2025, 8, 25, 10, 30, 15))
        );
        assert_eq!(
            parse_datetime(Some("2025-08-25")),
            Some(at(2025, 8, 25, 0, 0, 0))
        );
    }

    #[test]
    fn parses_compact_forms() {
        assert_eq!(
            parse_datetime(Some("20250825100000")),
            Some(at(2025, 8, 25, 10, 0, 0))
        );
        assert_eq!(
            parse_datetime(Some("20250825")),
            Some(at(2025, 8, 25, 0, 0, 0))
        );
    }

    #[test]
    fn trims_surrounding_whitespace() {
        assert_eq!(
            parse_datetime(Some("  2025-08-25  ")),
            Some(at(2025, 8, 25, 0, 0, 0))
        );
    }

    #[test]
    fn empty_and_absent_yield_none() {
        assert_eq!(parse_datetime(Some("")), None);
        assert_eq!(parse_datetime(Some("   ")), None);
        assert_eq!(parse_datetime(None), None);
    }

    #[test]
    fn garbage_yields_none() {
        assert_eq!(parse_datetime(Some("내일 오전")), None);
        assert_eq!(parse_datetime(Some("2025-13-40")), None);
        assert_eq!(parse_datetime(Some("2025-08-25 10:00:00 extra")), None);
    }

    #[test]
    fn earlier_day_orders_first() {
        let a = parse_datetime(Some("2025-08-25 10:00:00.0")).unwrap();
        let b = parse_datetime(Some("2025-08-26 10:00:00.0")).unwrap();
        assert!(a < b);
    }

    #[test]
    fn first_parsable_falls_back_then_sentinel() {
        assert_eq!(
            first_parsable(["", "2025-09-01"]),
            at(2025, 9, 1, 0, 0, 0)
        );
        assert_eq!(
            first_parsable(["2025-08-01", "2025-09-01"]),
            at(2025, 8, 1, 0, 0, 0)
        );
        assert_eq!(first_parsable(["", "not a date"]), SENTINEL_MAX);
    }
}
