//! SQLite-backed [`ReservationStore`].

use crate::error::StorageError;
use crate::repositories::{
    ReservationRepository, SqliteReservationRepository, SqliteVehicleRepository, VehicleRepository,
};
use crate::transaction;
use chrono::NaiveDate;
use rentdesk_core::{DateInterval, ReportMonth, ReservationRecord, ReservationStore, Result, VehicleId};
use sqlx::SqlitePool;
use std::collections::BTreeMap;

/// Reservation store over the `vehicles` and `reservations` tables.
///
/// Only active vehicles are visible: a retired vehicle reports
/// `VehicleNotFound` exactly like an unregistered one.
pub struct SqliteReservationStore {
    pool: SqlitePool,
    vehicles: SqliteVehicleRepository,
    reservations: SqliteReservationRepository,
}

impl SqliteReservationStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            vehicles: SqliteVehicleRepository::new(pool.clone()),
            reservations: SqliteReservationRepository::new(pool.clone()),
            pool,
        }
    }

    async fn ensure_vehicle(&self, vehicle: &VehicleId) -> Result<()> {
        if self.vehicles.exists_active(vehicle).await? {
            Ok(())
        } else {
            Err(StorageError::vehicle_not_found(vehicle.as_str()).into())
        }
    }
}

impl ReservationStore for SqliteReservationStore {
    async fn find_overlapping(
        &self,
        vehicle: &VehicleId,
        padded_start: NaiveDate,
        padded_end: NaiveDate,
    ) -> Result<u64> {
        self.ensure_vehicle(vehicle).await?;
        let window = DateInterval::new(padded_start, padded_end)?;
        Ok(self.reservations.count_overlapping(vehicle, window).await?)
    }

    async fn insert(&self, record: &ReservationRecord, guard: DateInterval) -> Result<()> {
        let plate = record.vehicle.as_str();
        let mut tx = self.pool.begin().await.map_err(StorageError::from)?;

        if !transaction::vehicle_exists(&mut tx, &record.vehicle).await? {
            return Err(StorageError::vehicle_not_found(plate).into());
        }

        let conflicts = transaction::count_overlapping(&mut tx, &record.vehicle, guard).await?;
        if conflicts > 0 {
            tracing::warn!(vehicle = plate, %conflicts, "Reservation window taken before insert");
            return Err(StorageError::Overlap {
                vehicle: plate.to_string(),
            }
            .into());
        }

        let id = transaction::create_reservation(&mut tx, record).await?;
        tx.commit()
            .await
            .map_err(|e| StorageError::from_insert(e, plate))?;

        tracing::info!(
            id,
            vehicle = plate,
            start = %record.interval.start(),
            end = %record.interval.end(),
            cost = record.cost,
            "Reservation stored"
        );
        Ok(())
    }

    async fn monthly_occupancy(&self, month: ReportMonth) -> Result<BTreeMap<VehicleId, u32>> {
        let bounds = month.interval();
        let rows = self.reservations.find_intersecting(bounds).await?;

        let mut occupancy = BTreeMap::new();
        for row in rows {
            let record = row.to_record()?;
            if let Some(inside) = record.interval.clamp(&bounds) {
                *occupancy.entry(record.vehicle).or_insert(0) += inside.day_count() as u32;
            }
        }

        tracing::debug!(%month, vehicles = occupancy.len(), "Computed monthly occupancy");
        Ok(occupancy)
    }
}
