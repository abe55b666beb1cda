//! Timestamp parsing and calendar helpers.
//!
//! News feeds mix timezone-aware and naive timestamp strings in the same
//! file; everything is normalised to UTC here. Naive values are taken as
//! already being UTC.

use chrono::{DateTime, NaiveDate, TimeZone, Utc, Weekday};
use tracing::warn;

/// Weekdays in report order, Monday first.
pub const WEEKDAY_ORDER: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Full English name for a weekday.
pub fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Shift a UTC hour to EST as a fixed UTC-4 offset.
///
/// Deliberately ignores daylight saving: the source data convention is a
/// constant four-hour shift, and downstream reports depend on it.
pub fn est_hour(hour_utc: u32) -> u32 {
    (hour_utc + 20) % 24
}

// ── TimestampParser ───────────────────────────────────────────────────────────

/// Parses publication timestamps from the variety of formats found in news
/// CSV exports.
pub struct TimestampParser;

impl TimestampParser {
    /// Attempt to parse a timestamp string into a UTC [`DateTime`].
    ///
    /// Handles RFC 3339 / ISO 8601 with offset (including `Z` suffix),
    /// RFC 2822, and a series of common naive patterns which are
    /// interpreted as UTC. Returns `None` when nothing matches.
    pub fn parse(s: &str) -> Option<DateTime<Utc>> {
        let s = s.trim();
        if s.is_empty() {
            return None;
        }

        // Replace trailing 'Z' with '+00:00' for RFC 3339 compatibility.
        let normalised = if let Some(stripped) = s.strip_suffix('Z') {
            format!("{}+00:00", stripped)
        } else {
            s.to_string()
        };

        if let Ok(dt) = DateTime::parse_from_rfc3339(&normalised) {
            return Some(dt.with_timezone(&Utc));
        }

        if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
            return Some(dt.with_timezone(&Utc));
        }

        // Aware patterns with a numeric offset but no 'T' separator.
        const AWARE_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%z", "%Y-%m-%d %H:%M:%S%.f%z"];
        for fmt in AWARE_FORMATS {
            if let Ok(dt) = DateTime::parse_from_str(s, fmt) {
                return Some(dt.with_timezone(&Utc));
            }
        }

        // Naive patterns, interpreted as UTC.
        const NAIVE_FORMATS: &[&str] = &[
            "%Y-%m-%dT%H:%M:%S%.f",
            "%Y-%m-%dT%H:%M:%S",
            "%Y-%m-%d %H:%M:%S%.f",
            "%Y-%m-%d %H:%M:%S",
            "%Y-%m-%d",
            "%m/%d/%Y %H:%M:%S",
            "%m/%d/%Y",
        ];

        for fmt in NAIVE_FORMATS {
            if let Ok(naive) = chrono::NaiveDateTime::parse_from_str(s, fmt) {
                return Some(Utc.from_utc_datetime(&naive));
            }
            if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
                let naive = date.and_hms_opt(0, 0, 0)?;
                return Some(Utc.from_utc_datetime(&naive));
            }
        }

        warn!("TimestampParser: could not parse timestamp string \"{}\"", s);
        None
    }

    /// Parse a calendar-date string (price CSVs carry dates, not instants).
    ///
    /// Accepts plain `%Y-%m-%d` as well as full timestamps, from which the
    /// UTC calendar date is taken.
    pub fn parse_date(s: &str) -> Option<NaiveDate> {
        let s = s.trim();
        if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
            return Some(date);
        }
        if let Ok(date) = NaiveDate::parse_from_str(s, "%m/%d/%Y") {
            return Some(date);
        }
        Self::parse(s).map(|dt| dt.date_naive())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    // ── est_hour ──────────────────────────────────────────────────────────────

    #[test]
    fn test_est_hour_is_utc_minus_four_mod_24() {
        for h in 0..24u32 {
            let expected = (h + 24 - 4) % 24;
            assert_eq!(est_hour(h), expected, "hour {h}");
        }
    }

    #[test]
    fn test_est_hour_wraps_below_four() {
        assert_eq!(est_hour(0), 20);
        assert_eq!(est_hour(3), 23);
        assert_eq!(est_hour(4), 0);
    }

    // ── weekday_name ──────────────────────────────────────────────────────────

    #[test]
    fn test_weekday_names_in_order() {
        let names: Vec<&str> = WEEKDAY_ORDER.iter().map(|w| weekday_name(*w)).collect();
        assert_eq!(
            names,
            vec![
                "Monday",
                "Tuesday",
                "Wednesday",
                "Thursday",
                "Friday",
                "Saturday",
                "Sunday"
            ]
        );
    }

    // ── TimestampParser::parse ────────────────────────────────────────────────

    #[test]
    fn test_parse_z_suffix_iso() {
        let dt = TimestampParser::parse("2020-03-23T10:30:00Z").unwrap();
        assert_eq!(dt.date_naive(), NaiveDate::from_ymd_opt(2020, 3, 23).unwrap());
        assert_eq!(dt.hour(), 10);
    }

    #[test]
    fn test_parse_rfc3339_with_offset_normalises_to_utc() {
        let dt = TimestampParser::parse("2020-06-10T14:00:00-04:00").unwrap();
        assert_eq!(dt.hour(), 18);
    }

    #[test]
    fn test_parse_space_separated_with_offset() {
        let dt = TimestampParser::parse("2020-06-10 14:00:00-0400").unwrap();
        assert_eq!(dt.hour(), 18);
    }

    #[test]
    fn test_parse_naive_datetime_taken_as_utc() {
        let dt = TimestampParser::parse("2020-11-09 09:15:00").unwrap();
        assert_eq!(dt.hour(), 9);
        assert_eq!(dt.minute(), 15);
    }

    #[test]
    fn test_parse_date_only_string_is_midnight_utc() {
        let dt = TimestampParser::parse("2021-01-27").unwrap();
        assert_eq!(dt.hour(), 0);
        assert_eq!(dt.date_naive(), NaiveDate::from_ymd_opt(2021, 1, 27).unwrap());
    }

    #[test]
    fn test_parse_empty_and_garbage_return_none() {
        assert!(TimestampParser::parse("").is_none());
        assert!(TimestampParser::parse("   ").is_none());
        assert!(TimestampParser::parse("not-a-timestamp").is_none());
    }

    #[test]
    fn test_parse_date_only_equals_calendar_date_of_instant() {
        // Property from the loader contract: date_only is the calendar date
        // of the parsed UTC instant.
        for s in [
            "2020-03-23T00:00:01Z",
            "2020-03-23 12:00:00",
            "2020-03-23T23:59:59+00:00",
        ] {
            let dt = TimestampParser::parse(s).unwrap();
            assert_eq!(dt.date_naive(), NaiveDate::from_ymd_opt(2020, 3, 23).unwrap());
        }
    }

    // ── TimestampParser::parse_date ───────────────────────────────────────────

    #[test]
    fn test_parse_date_plain() {
        let d = TimestampParser::parse_date("2020-03-23").unwrap();
        assert_eq!(d, NaiveDate::from_ymd_opt(2020, 3, 23).unwrap());
    }

    #[test]
    fn test_parse_date_from_full_timestamp() {
        let d = TimestampParser::parse_date("2020-03-23 15:59:00").unwrap();
        assert_eq!(d, NaiveDate::from_ymd_opt(2020, 3, 23).unwrap());
    }

    #[test]
    fn test_parse_date_us_style() {
        let d = TimestampParser::parse_date("03/23/2020").unwrap();
        assert_eq!(d, NaiveDate::from_ymd_opt(2020, 3, 23).unwrap());
    }

    #[test]
    fn test_parse_date_garbage_returns_none() {
        assert!(TimestampParser::parse_date("n/a").is_none());
    }
}
