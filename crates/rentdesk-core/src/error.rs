use chrono::{NaiveDate, Weekday};
use thiserror::Error;

/// Broad classification of an [`Error`].
///
/// None of these are retried inside the core; the kind tells the caller how to
/// surface the failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Caller-supplied data violates a business rule.
    Input,
    /// The requested interval overlaps an existing reservation.
    Conflict,
    /// The referenced vehicle is not part of the fleet.
    NotFound,
    /// The reservation store failed.
    Store,
    /// Nothing to report for the requested period.
    NoData,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    // Input errors
    #[error("Invalid date format: '{value}' (expected YYYY-MM-DD)")]
    InvalidDateFormat { value: String },

    #[error("Start date {start} is after end date {end}")]
    StartAfterEnd { start: NaiveDate, end: NaiveDate },

    #[error("{date} falls on {weekday}, rentals must start and end on a business day")]
    NonBusinessDay { date: NaiveDate, weekday: Weekday },

    #[error("Rental period of {days} days exceeds the maximum of {max} days")]
    PeriodTooLong { days: i64, max: u32 },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    // Conflict errors
    #[error("Vehicle {vehicle} is already reserved for the requested period")]
    VehicleBusy { vehicle: String },

    // Lookup errors
    #[error("Vehicle not found: {0}")]
    VehicleNotFound(String),

    // Store errors
    #[error("Reservation store error: {0}")]
    Store(String),

    #[error("Reservation for vehicle {vehicle} lost a race with a concurrent booking")]
    ConcurrentReservation { vehicle: String },

    // Reporting
    #[error("No reservations recorded for {month}")]
    NoData { month: String },
}

impl Error {
    /// Classify this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidDateFormat { .. }
            | Error::StartAfterEnd { .. }
            | Error::NonBusinessDay { .. }
            | Error::PeriodTooLong { .. }
            | Error::InvalidInput(_) => ErrorKind::Input,
            Error::VehicleBusy { .. } => ErrorKind::Conflict,
            Error::VehicleNotFound(_) => ErrorKind::NotFound,
            Error::Store(_) | Error::ConcurrentReservation { .. } => ErrorKind::Store,
            Error::NoData { .. } => ErrorKind::NoData,
        }
    }

    /// Returns `true` for errors caused by the caller's data.
    #[must_use]
    pub fn is_input(&self) -> bool {
        self.kind() == ErrorKind::Input
    }
}

pub type Result<T> = std::result::Result<T, Error>;
