//! Unit tests for the Temporal module
//!
//! Tests cover ValidityPeriod construction and containment, and
//! point-in-time parsing.

use chrono::{Duration, TimeZone, Utc};
use core_kernel::{parse_instant, TemporalError, ValidityPeriod};

mod validity_period {
    use super::*;

    #[test]
    fn test_new_rejects_start_after_end() {
        let start = Utc.with_ymd_and_hms(2024, 6, 2, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();

        let result = ValidityPeriod::new(start, Some(end));
        assert!(matches!(result, Err(TemporalError::InvalidPeriod { .. })));
    }

    #[test]
    fn test_new_allows_zero_length_period() {
        let at = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        let period = ValidityPeriod::new(at, Some(at)).unwrap();

        assert_eq!(period.end, Some(period.start));
        assert!(!period.contains(at));
    }

    #[test]
    fn test_contains_is_start_inclusive_end_exclusive() {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap();
        let period = ValidityPeriod::new(start, Some(end)).unwrap();

        assert!(period.contains(start));
        assert!(period.contains(end - Duration::seconds(1)));
        assert!(!period.contains(end));
        assert!(!period.contains(start - Duration::seconds(1)));
    }

    #[test]
    fn test_current_period_is_open_ended() {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let period = ValidityPeriod::new(start, None).unwrap();

        assert!(period.contains(start));
        assert!(period.contains(Utc.with_ymd_and_hms(2099, 1, 1, 0, 0, 0).unwrap()));
        assert!(!period.contains(start - Duration::milliseconds(1)));
    }
}

mod parsing {
    use super::*;

    #[test]
    fn test_parse_rfc3339_with_offset() {
        let ts = parse_instant("2024-06-15T14:00:00+02:00").unwrap();
        assert_eq!(ts, Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_naive_datetime_as_utc() {
        let ts = parse_instant("2024-06-15T12:30:00").unwrap();
        assert_eq!(ts, Utc.with_ymd_and_hms(2024, 6, 15, 12, 30, 0).unwrap());
    }

    #[test]
    fn test_parse_naive_datetime_with_fraction() {
        let ts = parse_instant("2024-06-15 12:30:00.250").unwrap();
        assert_eq!(ts, Utc.with_ymd_and_hms(2024, 6, 15, 12, 30, 0).unwrap() + Duration::milliseconds(250));
    }

    #[test]
    fn test_parse_bare_date_is_midnight() {
        let ts = parse_instant("2024-06-15").unwrap();
        assert_eq!(ts, Utc.with_ymd_and_hms(2024, 6, 15, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(
            parse_instant("last tuesday"),
            Err(TemporalError::InvalidInstant("last tuesday".to_string()))
        );
    }
}
