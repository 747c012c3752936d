#![allow(async_fn_in_trait)]

use crate::error::StorageResult;
use crate::models::Reservation;
use rentdesk_core::{DateInterval, VehicleId};
use sqlx::SqlitePool;

/// Repository trait for reading reservations
///
/// Writes go through [`crate::transaction::create_reservation`] so that the
/// overlap check and the insert share one transaction.
pub trait ReservationRepository: Send + Sync {
    /// Count reservations of `vehicle` sharing at least one day with `window`
    async fn count_overlapping(&self, vehicle: &VehicleId, window: DateInterval) -> StorageResult<u64>;

    /// All reservations of a vehicle, earliest first
    async fn find_by_vehicle(&self, vehicle: &VehicleId) -> StorageResult<Vec<Reservation>>;

    /// All reservations of any vehicle sharing at least one day with `window`
    async fn find_intersecting(&self, window: DateInterval) -> StorageResult<Vec<Reservation>>;
}

/// SQLite implementation of ReservationRepository
pub struct SqliteReservationRepository {
    pool: SqlitePool,
}

impl SqliteReservationRepository {
    /// Create a new SQLite reservation repository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl ReservationRepository for SqliteReservationRepository {
    async fn count_overlapping(&self, vehicle: &VehicleId, window: DateInterval) -> StorageResult<u64> {
        let result: (i64,) = sqlx::query_as(
            r#"
            SELECT COUNT(*) FROM reservations
            WHERE vehicle_plate = ?
              AND start_date <= ?
              AND ? <= end_date
            "#,
        )
        .bind(vehicle.as_str())
        .bind(window.end())
        .bind(window.start())
        .fetch_one(&self.pool)
        .await?;

        Ok(result.0.max(0) as u64)
    }

    async fn find_by_vehicle(&self, vehicle: &VehicleId) -> StorageResult<Vec<Reservation>> {
        let reservations = sqlx::query_as::<_, Reservation>(
            r#"
            SELECT id, vehicle_plate, start_date, end_date, cost, created_at
            FROM reservations
            WHERE vehicle_plate = ?
            ORDER BY start_date
            "#,
        )
        .bind(vehicle.as_str())
        .fetch_all(&self.pool)
        .await?;

        Ok(reservations)
    }

    async fn find_intersecting(&self, window: DateInterval) -> StorageResult<Vec<Reservation>> {
        let reservations = sqlx::query_as::<_, Reservation>(
            r#"
            SELECT id, vehicle_plate, start_date, end_date, cost, created_at
            FROM reservations
            WHERE start_date <= ?
              AND ? <= end_date
            ORDER BY vehicle_plate, start_date
            "#,
        )
        .bind(window.end())
        .bind(window.start())
        .fetch_all(&self.pool)
        .await?;

        Ok(reservations)
    }
}
