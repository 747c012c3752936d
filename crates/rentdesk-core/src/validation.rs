//! Business-rule validation for requested rental intervals.
//!
//! A request is admissible when:
//!
//! 1. both dates parse as `YYYY-MM-DD`
//! 2. the start is not after the end (a same-day rental is allowed)
//! 3. neither the start nor the end falls on a Saturday or Sunday
//! 4. the inclusive duration does not exceed the configured maximum
//!
//! The first failure is returned. A weekend start is rejected as soon as the
//! start date parses, before anything about the end date is looked at.
//!
//! # Examples
//!
//! ```
//! use rentdesk_core::{Error, validation::parse_and_validate};
//!
//! // Monday to Friday
//! let period = parse_and_validate("2025-01-06", "2025-01-10", 30).unwrap();
//! assert_eq!(period.days(), 5);
//!
//! // Saturday start
//! assert!(matches!(
//!     parse_and_validate("2025-01-04", "2025-01-10", 30),
//!     Err(Error::NonBusinessDay { .. })
//! ));
//! ```

use crate::{
    Error, Result,
    constants::DATE_FORMAT,
    types::{DateInterval, RentalRequest, ValidatedInterval, ValidatedRental},
};
use chrono::{Datelike, NaiveDate, Weekday};

/// Parse a single `YYYY-MM-DD` date.
///
/// # Errors
/// Returns `Error::InvalidDateFormat` carrying the offending input.
pub fn parse_date(raw: &str) -> Result<NaiveDate> {
    let trimmed = raw.trim();
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT).map_err(|_| Error::InvalidDateFormat {
        value: trimmed.to_string(),
    })
}

/// Returns `true` for Monday through Friday.
#[inline]
#[must_use]
pub fn is_business_day(date: NaiveDate) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

pub(crate) fn ensure_business_day(date: NaiveDate) -> Result<()> {
    if is_business_day(date) {
        Ok(())
    } else {
        Err(Error::NonBusinessDay {
            date,
            weekday: date.weekday(),
        })
    }
}

/// Apply the business rules to an already-parsed pair of dates.
///
/// # Errors
/// `NonBusinessDay` (start), `StartAfterEnd`, `NonBusinessDay` (end) or
/// `PeriodTooLong`, in that order of precedence.
pub fn validate_dates(start: NaiveDate, end: NaiveDate, max_period: u32) -> Result<ValidatedInterval> {
    ensure_business_day(start)?;
    let interval = DateInterval::new(start, end)?;
    ensure_business_day(end)?;

    let days = interval.day_count();
    if days > i64::from(max_period) {
        return Err(Error::PeriodTooLong {
            days,
            max: max_period,
        });
    }

    // days <= max_period, which fits in u32
    let days = u32::try_from(days).map_err(|_| Error::PeriodTooLong {
        days,
        max: max_period,
    })?;

    Ok(ValidatedInterval { interval, days })
}

/// Parse and validate a raw rental interval.
///
/// # Errors
/// - `Error::InvalidDateFormat` if either date does not parse
/// - `Error::StartAfterEnd` if the start is after the end
/// - `Error::NonBusinessDay` if either bound is on a weekend
/// - `Error::PeriodTooLong` if the inclusive duration exceeds `max_period`
pub fn parse_and_validate(raw_start: &str, raw_end: &str, max_period: u32) -> Result<ValidatedInterval> {
    let start = parse_date(raw_start)?;
    ensure_business_day(start)?;
    let end = parse_date(raw_end)?;
    validate_dates(start, end, max_period)
}

/// Validate a typed [`RentalRequest`].
///
/// # Errors
/// Same as [`validate_dates`].
pub fn validate_request(request: &RentalRequest, max_period: u32) -> Result<ValidatedRental> {
    let period = validate_dates(request.start(), request.end(), max_period)?;
    Ok(ValidatedRental {
        vehicle: request.vehicle().clone(),
        period,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const MAX: u32 = 30;

    #[rstest]
    // Mon..Fri of the same week
    #[case("2025-01-06", "2025-01-10", 5)]
    // Same-day rental
    #[case("2025-01-08", "2025-01-08", 1)]
    // Fri..Mon across a weekend
    #[case("2025-01-10", "2025-01-13", 4)]
    // Across a month boundary
    #[case("2025-01-31", "2025-02-03", 4)]
    // Exactly at the maximum: Mon 2025-01-06 + 29 days = Tue 2025-02-04
    #[case("2025-01-06", "2025-02-04", 30)]
    fn test_valid_intervals(#[case] start: &str, #[case] end: &str, #[case] days: u32) {
        let period = parse_and_validate(start, end, MAX).unwrap();
        assert_eq!(period.days(), days);
        assert_eq!(period.interval().day_count(), i64::from(days));
    }

    #[rstest]
    #[case("2025/01/06", "2025-01-10")]
    #[case("2025-01-06", "10-01-2025")]
    #[case("", "2025-01-10")]
    #[case("2025-02-30", "2025-03-03")]
    #[case("tomorrow", "2025-01-10")]
    fn test_invalid_format(#[case] start: &str, #[case] end: &str) {
        assert!(matches!(
            parse_and_validate(start, end, MAX),
            Err(Error::InvalidDateFormat { .. })
        ));
    }

    #[test]
    fn test_invalid_format_reports_offending_value() {
        let err = parse_and_validate("2025-01-06", " 2025-13-01 ", MAX).unwrap_err();
        assert_eq!(
            err,
            Error::InvalidDateFormat {
                value: "2025-13-01".to_string()
            }
        );
    }

    #[test]
    fn test_start_after_end() {
        assert!(matches!(
            parse_and_validate("2025-01-10", "2025-01-09", MAX),
            Err(Error::StartAfterEnd { .. })
        ));
    }

    #[rstest]
    // Saturday start
    #[case("2025-01-04", "2025-01-07")]
    // Sunday start
    #[case("2025-01-05", "2025-01-07")]
    // Saturday end
    #[case("2025-01-06", "2025-01-11")]
    // Sunday end
    #[case("2025-01-06", "2025-01-12")]
    fn test_weekend_bounds(#[case] start: &str, #[case] end: &str) {
        assert!(matches!(
            parse_and_validate(start, end, MAX),
            Err(Error::NonBusinessDay { .. })
        ));
    }

    #[test]
    fn test_weekend_start_reported_before_end() {
        let err = parse_and_validate("2025-01-04", "2025-01-05", MAX).unwrap_err();
        assert_eq!(
            err,
            Error::NonBusinessDay {
                date: NaiveDate::from_ymd_opt(2025, 1, 4).unwrap(),
                weekday: Weekday::Sat,
            }
        );
    }

    #[rstest]
    // End before start
    #[case("2025-01-04", "2025-01-01")]
    // End unparseable
    #[case("2025-01-05", "not-a-date")]
    fn test_weekend_start_wins_over_end_problems(#[case] start: &str, #[case] end: &str) {
        assert!(matches!(
            parse_and_validate(start, end, MAX),
            Err(Error::NonBusinessDay { .. })
        ));
    }

    #[test]
    fn test_period_too_long() {
        // Mon 2025-01-06 .. Wed 2025-02-05 is 31 days
        assert_eq!(
            parse_and_validate("2025-01-06", "2025-02-05", MAX).unwrap_err(),
            Error::PeriodTooLong { days: 31, max: 30 }
        );
    }

    #[test]
    fn test_zero_max_period_rejects_everything() {
        assert!(matches!(
            parse_and_validate("2025-01-06", "2025-01-06", 0),
            Err(Error::PeriodTooLong { days: 1, max: 0 })
        ));
    }

    #[rstest]
    #[case::weekend_start_bad_end("2025-01-04", "garbage")]
    #[case::weekend_start_reversed("2025-01-05", "2025-01-01")]
    #[case::bad_start("04/01/2025", "2025-01-10")]
    #[case::bad_end("2025-01-06", "garbage")]
    #[case::weekend_end("2025-01-06", "2025-01-11")]
    #[case::too_long("2025-01-06", "2025-02-05")]
    #[case::valid("2025-01-06", "2025-01-10")]
    fn test_typed_path_matches_raw_path(#[case] start: &str, #[case] end: &str) {
        let raw = parse_and_validate(start, end, MAX);
        let typed = RentalRequest::parse("A1", start, end)
            .and_then(|request| validate_request(&request, MAX))
            .map(|rental| rental.period);
        assert_eq!(typed, raw);
    }

    #[test]
    fn test_typed_parse_weekend_start_wins_over_bad_end() {
        assert_eq!(
            RentalRequest::parse("A1", "2025-01-04", "garbage").unwrap_err(),
            Error::NonBusinessDay {
                date: NaiveDate::from_ymd_opt(2025, 1, 4).unwrap(),
                weekday: Weekday::Sat,
            }
        );
    }

    #[test]
    fn test_validate_request_keeps_vehicle() {
        let request = RentalRequest::parse("ab-1", "2025-01-06", "2025-01-07").unwrap();
        let rental = validate_request(&request, MAX).unwrap();
        assert_eq!(rental.vehicle.as_str(), "AB-1");
        assert_eq!(rental.period.days(), 2);
    }
}
