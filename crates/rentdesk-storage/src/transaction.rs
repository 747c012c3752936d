//! Transaction-aware reservation operations.
//!
//! Booking is a check-then-act sequence: count conflicting reservations, then
//! insert. Run both inside one transaction so the store, not the caller,
//! upholds the no-overlap invariant.
//!
//! # Usage Pattern
//!
//! ```no_run
//! use rentdesk_storage::{Database, DatabaseConfig, transaction};
//! use rentdesk_core::{DateInterval, ReservationRecord, VehicleId};
//! use chrono::NaiveDate;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let db = Database::new(DatabaseConfig::new("rentdesk.db")).await?;
//! let vehicle = VehicleId::new("A001AA")?;
//! let interval = DateInterval::new(
//!     NaiveDate::from_ymd_opt(2025, 1, 6).unwrap(),
//!     NaiveDate::from_ymd_opt(2025, 1, 10).unwrap(),
//! )?;
//!
//! let mut tx = db.pool().begin().await?;
//! if transaction::count_overlapping(&mut tx, &vehicle, interval.padded(3)?).await? == 0 {
//!     let record = ReservationRecord::new(vehicle, interval, 4950.0);
//!     transaction::create_reservation(&mut tx, &record).await?;
//! }
//! tx.commit().await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Atomic Guarantees
//!
//! SQLite allows one writer at a time. If another connection commits a write
//! between this transaction's read and its insert, the insert fails with
//! `SQLITE_BUSY` instead of writing on stale data; that surfaces as
//! [`StorageError::Busy`](crate::StorageError::Busy). The
//! `reservations_no_overlap` trigger rejects any overlapping row regardless.

use crate::error::{StorageError, StorageResult};
use rentdesk_core::{DateInterval, ReservationRecord, VehicleId};
use sqlx::{Sqlite, Transaction};

/// Check that an active vehicle with this plate exists
pub async fn vehicle_exists(tx: &mut Transaction<'_, Sqlite>, vehicle: &VehicleId) -> StorageResult<bool> {
    let result: (i64,) =
        sqlx::query_as("SELECT COUNT(*) FROM vehicles WHERE plate = ? AND active = 1")
            .bind(vehicle.as_str())
            .fetch_one(&mut **tx)
            .await?;

    Ok(result.0 > 0)
}

/// Count reservations of `vehicle` sharing a day with `window`
pub async fn count_overlapping(
    tx: &mut Transaction<'_, Sqlite>,
    vehicle: &VehicleId,
    window: DateInterval,
) -> StorageResult<u64> {
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
    .fetch_one(&mut **tx)
    .await?;

    Ok(result.0.max(0) as u64)
}

/// Insert a reservation within a transaction
///
/// # Returns
///
/// Returns the auto-generated reservation ID on success
///
/// # Errors
///
/// - [`StorageError::Overlap`] if the row would intersect an existing reservation
/// - [`StorageError::Busy`] if another writer got in first
/// - [`StorageError::Database`] for foreign key or other constraint violations
pub async fn create_reservation(
    tx: &mut Transaction<'_, Sqlite>,
    record: &ReservationRecord,
) -> StorageResult<i64> {
    let result = sqlx::query(
        r#"
        INSERT INTO reservations (vehicle_plate, start_date, end_date, cost)
        VALUES (?, ?, ?, ?)
        "#,
    )
    .bind(record.vehicle.as_str())
    .bind(record.interval.start())
    .bind(record.interval.end())
    .bind(record.cost)
    .execute(&mut **tx)
    .await
    .map_err(|e| StorageError::from_insert(e, record.vehicle.as_str()))?;

    Ok(result.last_insert_rowid())
}
