use crate::{
    Result,
    constants::{DATE_FORMAT, DURATION_OFFSET_DAYS, MAX_VEHICLE_ID_LENGTH, MIN_VEHICLE_ID_LENGTH},
    error::Error,
    validation::{ensure_business_day, parse_date},
};
use chrono::{Datelike, Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Vehicle identifier (registration plate, 1-20 characters)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct VehicleId(String);

impl VehicleId {
    /// Create a new vehicle identifier with validation.
    ///
    /// The identifier is normalized (trimmed and converted to uppercase) before validation.
    ///
    /// # Errors
    /// Returns `Error::InvalidInput` if:
    /// - The identifier length is not between 1-20 characters
    /// - The identifier contains anything other than ASCII letters, digits or `-`
    pub fn new(plate: &str) -> Result<Self> {
        let plate = plate.trim().to_uppercase();

        let len = plate.len();
        if !(MIN_VEHICLE_ID_LENGTH..=MAX_VEHICLE_ID_LENGTH).contains(&len) {
            return Err(Error::InvalidInput(format!(
                "Vehicle id must be {MIN_VEHICLE_ID_LENGTH}-{MAX_VEHICLE_ID_LENGTH} chars, got {len}"
            )));
        }

        if !plate.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
            return Err(Error::InvalidInput(format!(
                "Vehicle id '{plate}' may only contain letters, digits and '-'"
            )));
        }

        Ok(VehicleId(plate))
    }

    /// Get the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VehicleId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for VehicleId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        VehicleId::new(s)
    }
}

impl TryFrom<String> for VehicleId {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        VehicleId::new(&value)
    }
}

impl From<VehicleId> for String {
    fn from(id: VehicleId) -> Self {
        id.0
    }
}

/// Closed calendar-day interval `[start, end]`.
///
/// Both bounds are part of the interval, so `[Jan 10, Jan 15]` and
/// `[Jan 15, Jan 20]` share Jan 15 and intersect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct DateInterval {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateInterval {
    /// Create an interval.
    ///
    /// # Errors
    /// Returns `Error::StartAfterEnd` if `start > end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if start > end {
            return Err(Error::StartAfterEnd { start, end });
        }
        Ok(Self { start, end })
    }

    #[inline]
    #[must_use]
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    #[inline]
    #[must_use]
    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Number of calendar days covered, counted inclusively.
    #[must_use]
    pub fn day_count(&self) -> i64 {
        (self.end - self.start).num_days() + DURATION_OFFSET_DAYS
    }

    /// Returns `true` if both intervals share at least one day.
    ///
    /// `[a, b]` and `[c, d]` intersect iff `a <= d && c <= b`.
    #[must_use]
    pub fn intersects(&self, other: &DateInterval) -> bool {
        self.start <= other.end && other.start <= self.end
    }

    /// Extend the interval by `days` on both sides.
    ///
    /// # Errors
    /// Returns `Error::InvalidInput` if the padded bounds leave the supported date range.
    pub fn padded(&self, days: u32) -> Result<Self> {
        let pad = Days::new(u64::from(days));
        let start = self
            .start
            .checked_sub_days(pad)
            .ok_or_else(|| Error::InvalidInput(format!("Buffer of {days} days is out of range")))?;
        let end = self
            .end
            .checked_add_days(pad)
            .ok_or_else(|| Error::InvalidInput(format!("Buffer of {days} days is out of range")))?;
        Ok(Self { start, end })
    }

    /// The part of `self` that lies within `bounds`, if any.
    #[must_use]
    pub fn clamp(&self, bounds: &DateInterval) -> Option<DateInterval> {
        if !self.intersects(bounds) {
            return None;
        }
        Some(Self {
            start: self.start.max(bounds.start),
            end: self.end.min(bounds.end),
        })
    }
}

impl fmt::Display for DateInterval {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "[{}, {}]",
            self.start.format(DATE_FORMAT),
            self.end.format(DATE_FORMAT)
        )
    }
}

/// A rental request after the typed parse step.
///
/// Dates are parsed but no business rule has been applied yet; see
/// [`crate::validation::validate_request`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RentalRequest {
    vehicle: VehicleId,
    start: NaiveDate,
    end: NaiveDate,
}

impl RentalRequest {
    /// Parse a request from untrusted input.
    ///
    /// # Errors
    /// - `Error::InvalidInput` if the vehicle identifier is malformed
    /// - `Error::InvalidDateFormat` if either date is not `YYYY-MM-DD`
    /// - `Error::NonBusinessDay` if the start falls on a weekend and the end
    ///   does not parse; a weekend start outranks a malformed end
    pub fn parse(vehicle: &str, raw_start: &str, raw_end: &str) -> Result<Self> {
        let vehicle = VehicleId::new(vehicle)?;
        let start = parse_date(raw_start)?;
        let end = parse_date(raw_end).or_else(|err| {
            ensure_business_day(start)?;
            Err(err)
        })?;
        Ok(Self {
            vehicle,
            start,
            end,
        })
    }

    pub fn new(vehicle: VehicleId, start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            vehicle,
            start,
            end,
        }
    }

    #[must_use]
    pub fn vehicle(&self) -> &VehicleId {
        &self.vehicle
    }

    #[must_use]
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    #[must_use]
    pub fn end(&self) -> NaiveDate {
        self.end
    }
}

/// A date interval that passed every business rule.
///
/// Both bounds fall on Monday-Friday and `days` is between one and the
/// configured maximum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ValidatedInterval {
    pub(crate) interval: DateInterval,
    pub(crate) days: u32,
}

impl ValidatedInterval {
    #[must_use]
    pub fn interval(&self) -> DateInterval {
        self.interval
    }

    #[must_use]
    pub fn start(&self) -> NaiveDate {
        self.interval.start()
    }

    #[must_use]
    pub fn end(&self) -> NaiveDate {
        self.interval.end()
    }

    /// Rental duration in days (at least one).
    #[must_use]
    pub fn days(&self) -> u32 {
        self.days
    }
}

/// A validated interval bound to the vehicle it was requested for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedRental {
    pub vehicle: VehicleId,
    pub period: ValidatedInterval,
}

/// Transient per-request availability question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvailabilityQuery {
    pub vehicle: VehicleId,
    pub interval: DateInterval,
    pub buffer_days: u32,
}

impl AvailabilityQuery {
    pub fn new(vehicle: VehicleId, interval: DateInterval, buffer_days: u32) -> Self {
        Self {
            vehicle,
            interval,
            buffer_days,
        }
    }

    /// The candidate interval widened by the service buffer on both sides.
    ///
    /// # Errors
    /// Returns `Error::InvalidInput` if the padding leaves the supported date range.
    pub fn padded_window(&self) -> Result<DateInterval> {
        self.interval.padded(self.buffer_days)
    }
}

/// Confirmed reservation, immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReservationRecord {
    pub vehicle: VehicleId,
    pub interval: DateInterval,
    pub cost: f64,
}

impl ReservationRecord {
    pub fn new(vehicle: VehicleId, interval: DateInterval, cost: f64) -> Self {
        Self {
            vehicle,
            interval,
            cost,
        }
    }
}

/// Calendar month used for utilization reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ReportMonth {
    first_day: NaiveDate,
}

impl ReportMonth {
    /// Create a month from its year and number (1-12).
    ///
    /// # Errors
    /// Returns `Error::InvalidInput` if the month does not exist.
    pub fn new(year: i32, month: u32) -> Result<Self> {
        let first_day = NaiveDate::from_ymd_opt(year, month, 1)
            .ok_or_else(|| Error::InvalidInput(format!("Invalid month {year}-{month}")))?;
        Ok(Self { first_day })
    }

    /// The month containing `date`.
    #[must_use]
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            first_day: date.with_day(1).unwrap_or(date),
        }
    }

    /// Parse a `YYYY-MM` month.
    ///
    /// # Errors
    /// Returns `Error::InvalidDateFormat` if the input is not a valid month.
    pub fn parse(raw: &str) -> Result<Self> {
        let raw = raw.trim();
        let first_day = NaiveDate::parse_from_str(&format!("{raw}-01"), DATE_FORMAT).map_err(
            |_| Error::InvalidDateFormat {
                value: raw.to_string(),
            },
        )?;
        Ok(Self { first_day })
    }

    #[must_use]
    pub fn first_day(&self) -> NaiveDate {
        self.first_day
    }

    #[must_use]
    pub fn last_day(&self) -> NaiveDate {
        self.first_day
            .checked_add_months(Months::new(1))
            .and_then(|next| next.pred_opt())
            .unwrap_or(self.first_day)
    }

    /// Number of days in the month (28-31).
    #[must_use]
    pub fn days(&self) -> u32 {
        self.last_day().day()
    }

    /// The whole month as a closed interval.
    #[must_use]
    pub fn interval(&self) -> DateInterval {
        DateInterval {
            start: self.first_day(),
            end: self.last_day(),
        }
    }
}

impl fmt::Display for ReportMonth {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.first_day.year(), self.first_day.month())
    }
}

impl std::str::FromStr for ReportMonth {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        ReportMonth::parse(s)
    }
}

impl TryFrom<String> for ReportMonth {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        ReportMonth::parse(&value)
    }
}

impl From<ReportMonth> for String {
    fn from(month: ReportMonth) -> Self {
        month.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[rstest]
    #[case("a123bc", "A123BC")]
    #[case("  x-777-yz ", "X-777-YZ")]
    #[case("12345678901234567890", "12345678901234567890")]
    fn test_vehicle_id_valid(#[case] input: &str, #[case] expected: &str) {
        let id = VehicleId::new(input).unwrap();
        assert_eq!(id.as_str(), expected);
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("123456789012345678901")]
    #[case("AB 123")]
    #[case("AB_123")]
    #[case("АВ123")] // cyrillic
    fn test_vehicle_id_invalid(#[case] input: &str) {
        assert!(matches!(
            VehicleId::new(input),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_vehicle_id_serde_normalizes() {
        let id: VehicleId = serde_json::from_str("\"ab-12\"").unwrap();
        assert_eq!(id.as_str(), "AB-12");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"AB-12\"");
        assert!(serde_json::from_str::<VehicleId>("\"bad id\"").is_err());
    }

    #[test]
    fn test_interval_rejects_reversed_bounds() {
        let err = DateInterval::new(date(2025, 1, 15), date(2025, 1, 10)).unwrap_err();
        assert!(matches!(err, Error::StartAfterEnd { .. }));
    }

    #[test]
    fn test_single_day_interval_counts_one_day() {
        let interval = DateInterval::new(date(2025, 1, 6), date(2025, 1, 6)).unwrap();
        assert_eq!(interval.day_count(), 1);
    }

    #[rstest]
    // Shared boundary day
    #[case((10, 15), (15, 20), true)]
    #[case((15, 20), (10, 15), true)]
    // Containment
    #[case((10, 20), (12, 13), true)]
    // Disjoint with a gap
    #[case((10, 14), (16, 20), false)]
    // Adjacent days do not share a day
    #[case((10, 14), (15, 20), false)]
    fn test_intersects(#[case] a: (u32, u32), #[case] b: (u32, u32), #[case] expected: bool) {
        let a = DateInterval::new(date(2025, 1, a.0), date(2025, 1, a.1)).unwrap();
        let b = DateInterval::new(date(2025, 1, b.0), date(2025, 1, b.1)).unwrap();
        assert_eq!(a.intersects(&b), expected);
    }

    #[rstest]
    #[case(0, false)]
    #[case(1, false)]
    #[case(2, true)]
    #[case(5, true)]
    fn test_buffer_padding_creates_overlap(#[case] buffer: u32, #[case] expected: bool) {
        let existing = DateInterval::new(date(2025, 1, 10), date(2025, 1, 14)).unwrap();
        let candidate = DateInterval::new(date(2025, 1, 16), date(2025, 1, 20)).unwrap();
        let padded = candidate.padded(buffer).unwrap();
        assert_eq!(padded.intersects(&existing), expected);
    }

    #[test]
    fn test_padding_crosses_month_boundary() {
        let interval = DateInterval::new(date(2025, 3, 3), date(2025, 3, 31)).unwrap();
        let padded = interval.padded(3).unwrap();
        assert_eq!(padded.start(), date(2025, 2, 28));
        assert_eq!(padded.end(), date(2025, 4, 3));
    }

    #[test]
    fn test_clamp() {
        let month = ReportMonth::new(2025, 2).unwrap().interval();
        let reservation = DateInterval::new(date(2025, 1, 27), date(2025, 2, 4)).unwrap();
        let clamped = reservation.clamp(&month).unwrap();
        assert_eq!(clamped.start(), date(2025, 2, 1));
        assert_eq!(clamped.day_count(), 4);

        let outside = DateInterval::new(date(2025, 3, 3), date(2025, 3, 4)).unwrap();
        assert!(outside.clamp(&month).is_none());
    }

    #[test]
    fn test_rental_request_parse() {
        let request = RentalRequest::parse("a1", "2025-01-06", "2025-01-10").unwrap();
        assert_eq!(request.vehicle().as_str(), "A1");
        assert_eq!(request.start(), date(2025, 1, 6));
        assert_eq!(request.end(), date(2025, 1, 10));

        assert!(matches!(
            RentalRequest::parse("a1", "06.01.2025", "2025-01-10"),
            Err(Error::InvalidDateFormat { .. })
        ));
        assert!(matches!(
            RentalRequest::parse("", "2025-01-06", "2025-01-10"),
            Err(Error::InvalidInput(_))
        ));
    }

    #[rstest]
    #[case("2025-01", 31)]
    #[case("2025-02", 28)]
    #[case("2024-02", 29)]
    #[case("2025-04", 30)]
    #[case("2025-12", 31)]
    fn test_report_month_days(#[case] raw: &str, #[case] expected: u32) {
        let month = ReportMonth::parse(raw).unwrap();
        assert_eq!(month.days(), expected);
        assert_eq!(month.to_string(), raw);
    }

    #[rstest]
    #[case("2025-13")]
    #[case("2025")]
    #[case("January")]
    #[case("2025-01-05")]
    fn test_report_month_invalid(#[case] raw: &str) {
        assert!(matches!(
            ReportMonth::parse(raw),
            Err(Error::InvalidDateFormat { .. })
        ));
    }

    #[test]
    fn test_report_month_containing() {
        let month = ReportMonth::containing(date(2025, 7, 19));
        assert_eq!(month.first_day(), date(2025, 7, 1));
        assert_eq!(month.last_day(), date(2025, 7, 31));
    }
}
