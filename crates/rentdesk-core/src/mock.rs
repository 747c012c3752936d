//! In-memory reservation store for testing and development.
//!
//! [`InMemoryReservationStore`] keeps the fleet and its reservations behind a
//! mutex and honours the same contract as the SQLite store: inserts that would
//! intersect an existing reservation of the same vehicle are rejected. A
//! failure can be injected to exercise error propagation.
//!
//! # Examples
//!
//! ```
//! use rentdesk_core::mock::InMemoryReservationStore;
//! use rentdesk_core::store::ReservationStore;
//! use rentdesk_core::VehicleId;
//! use chrono::NaiveDate;
//!
//! # tokio_test_block_on(async {
//! let store = InMemoryReservationStore::new();
//! let car = VehicleId::new("A001AA").unwrap();
//! store.register_vehicle(car.clone());
//!
//! let day = NaiveDate::from_ymd_opt(2025, 1, 6).unwrap();
//! assert_eq!(store.find_overlapping(&car, day, day).await.unwrap(), 0);
//! # });
//! # fn tokio_test_block_on<F: std::future::Future>(f: F) -> F::Output {
//! #     tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(f)
//! # }
//! ```

use crate::store::ReservationStore;
use crate::types::{DateInterval, ReportMonth, ReservationRecord, VehicleId};
use crate::{Error, Result};
use chrono::NaiveDate;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Mutex, MutexGuard, PoisonError};

#[derive(Debug, Default)]
struct State {
    vehicles: BTreeSet<VehicleId>,
    reservations: Vec<ReservationRecord>,
    failure: Option<Error>,
}

/// Mutex-backed [`ReservationStore`].
#[derive(Debug, Default)]
pub struct InMemoryReservationStore {
    state: Mutex<State>,
}

impl InMemoryReservationStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Add a vehicle to the fleet.
    pub fn register_vehicle(&self, vehicle: VehicleId) {
        self.state().vehicles.insert(vehicle);
    }

    /// Make every subsequent call fail with `error`.
    pub fn fail_with(&self, error: Error) {
        self.state().failure = Some(error);
    }

    /// Stop injecting failures.
    pub fn clear_failure(&self) {
        self.state().failure = None;
    }

    /// Snapshot of all stored reservations, in insertion order.
    pub fn reservations(&self) -> Vec<ReservationRecord> {
        self.state().reservations.clone()
    }

    fn check(state: &State, vehicle: &VehicleId) -> Result<()> {
        if let Some(error) = &state.failure {
            return Err(error.clone());
        }
        if !state.vehicles.contains(vehicle) {
            return Err(Error::VehicleNotFound(vehicle.to_string()));
        }
        Ok(())
    }
}

impl ReservationStore for InMemoryReservationStore {
    async fn find_overlapping(
        &self,
        vehicle: &VehicleId,
        padded_start: NaiveDate,
        padded_end: NaiveDate,
    ) -> Result<u64> {
        let state = self.state();
        Self::check(&state, vehicle)?;

        let window = DateInterval::new(padded_start, padded_end)?;
        let count = state
            .reservations
            .iter()
            .filter(|r| &r.vehicle == vehicle && r.interval.intersects(&window))
            .count();
        Ok(count as u64)
    }

    async fn insert(&self, record: &ReservationRecord, guard: DateInterval) -> Result<()> {
        let mut state = self.state();
        Self::check(&state, &record.vehicle)?;

        let taken = state.reservations.iter().any(|r| {
            r.vehicle == record.vehicle
                && (r.interval.intersects(&guard) || r.interval.intersects(&record.interval))
        });
        if taken {
            return Err(Error::ConcurrentReservation {
                vehicle: record.vehicle.to_string(),
            });
        }

        state.reservations.push(record.clone());
        Ok(())
    }

    async fn monthly_occupancy(&self, month: ReportMonth) -> Result<BTreeMap<VehicleId, u32>> {
        let state = self.state();
        if let Some(error) = &state.failure {
            return Err(error.clone());
        }

        let bounds = month.interval();
        let mut occupancy = BTreeMap::new();
        for reservation in &state.reservations {
            if let Some(inside) = reservation.interval.clamp(&bounds) {
                *occupancy.entry(reservation.vehicle.clone()).or_insert(0) +=
                    inside.day_count() as u32;
            }
        }
        Ok(occupancy)
    }
}
