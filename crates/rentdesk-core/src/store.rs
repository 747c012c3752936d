#![allow(async_fn_in_trait)]

use crate::Result;
use crate::types::{DateInterval, ReportMonth, ReservationRecord, VehicleId};
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Contract the booking core expects from reservation persistence.
///
/// # Consistency
///
/// Implementations must guarantee that, after commit, no two
/// [`ReservationRecord`]s for the same vehicle have intersecting intervals.
/// The availability check and the insert are two separate calls, so the
/// guarantee has to come from the store itself (a transaction, an exclusion
/// constraint or a per-vehicle lock). The core never retries.
///
/// # Implementation Note
///
/// This trait uses native async trait methods (Edition 2024 feature),
/// eliminating the need for the async-trait crate.
pub trait ReservationStore: Send + Sync {
    /// Count reservations of `vehicle` that share a day with
    /// `[padded_start, padded_end]`.
    ///
    /// # Errors
    /// `Error::VehicleNotFound` if the vehicle is not part of the fleet,
    /// `Error::Store` on backend failure.
    async fn find_overlapping(
        &self,
        vehicle: &VehicleId,
        padded_start: NaiveDate,
        padded_end: NaiveDate,
    ) -> Result<u64>;

    /// Persist a reservation.
    ///
    /// `guard` is the window (normally the reservation padded by the service
    /// buffer) that must be free of other reservations at commit time.
    ///
    /// # Errors
    /// `Error::ConcurrentReservation` if another booking claimed the window
    /// first, `Error::VehicleNotFound` or `Error::Store` otherwise.
    async fn insert(&self, record: &ReservationRecord, guard: DateInterval) -> Result<()>;

    /// Reserved days per vehicle within `month`.
    ///
    /// Reservations crossing the month boundary only count the days inside
    /// it. Vehicles without reservations in the month are omitted.
    ///
    /// # Errors
    /// `Error::Store` on backend failure.
    async fn monthly_occupancy(&self, month: ReportMonth) -> Result<BTreeMap<VehicleId, u32>>;
}
