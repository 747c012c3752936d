use chrono::{DateTime, NaiveDate, Utc};
use rentdesk_core::{DateInterval, ReservationRecord, VehicleId};
use serde::{Deserialize, Serialize};

use crate::error::{StorageError, StorageResult};

/// Persisted reservation row
///
/// Rows are insert-only; the `reservations_immutable` trigger rejects updates.
/// `start_date` and `end_date` are both part of the reservation (closed interval).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Reservation {
    /// Auto-increment primary key
    pub id: i64,

    /// Plate of the reserved vehicle (FK to `vehicles.plate`)
    pub vehicle_plate: String,

    /// First reserved day
    pub start_date: NaiveDate,

    /// Last reserved day
    pub end_date: NaiveDate,

    /// Total price charged for the rental
    pub cost: f64,

    /// Record creation timestamp
    pub created_at: DateTime<Utc>,
}

impl Reservation {
    /// The reserved days as an interval.
    ///
    /// # Errors
    /// Returns `StorageError::Validation` if the stored bounds are reversed.
    pub fn interval(&self) -> StorageResult<DateInterval> {
        DateInterval::new(self.start_date, self.end_date)
            .map_err(|e| StorageError::Validation(e.to_string()))
    }

    /// Convert the row into the core record type.
    ///
    /// # Errors
    /// Returns `StorageError::Validation` if the row holds malformed data.
    pub fn to_record(&self) -> StorageResult<ReservationRecord> {
        let vehicle =
            VehicleId::new(&self.vehicle_plate).map_err(|e| StorageError::Validation(e.to_string()))?;
        Ok(ReservationRecord::new(vehicle, self.interval()?, self.cost))
    }
}
