#![allow(async_fn_in_trait)]

use crate::error::{StorageError, StorageResult};
use crate::models::Vehicle;
use rentdesk_core::VehicleId;
use sqlx::SqlitePool;

/// Repository trait for the fleet registry
///
/// This trait uses native async trait methods (Edition 2024 feature).
pub trait VehicleRepository: Send + Sync {
    /// Find a vehicle by plate, active or not
    async fn find_by_plate(&self, plate: &VehicleId) -> StorageResult<Option<Vehicle>>;

    /// Get all vehicles that can currently be booked
    async fn find_all_active(&self) -> StorageResult<Vec<Vehicle>>;

    /// Register a new vehicle
    async fn create(&self, vehicle: &Vehicle) -> StorageResult<i64>;

    /// Retire or reinstate a vehicle
    async fn set_active(&self, plate: &VehicleId, active: bool) -> StorageResult<()>;

    /// Check if an active vehicle with this plate exists
    async fn exists_active(&self, plate: &VehicleId) -> StorageResult<bool>;
}

/// SQLite implementation of VehicleRepository
pub struct SqliteVehicleRepository {
    pool: SqlitePool,
}

impl SqliteVehicleRepository {
    /// Create a new SQLite vehicle repository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl VehicleRepository for SqliteVehicleRepository {
    async fn find_by_plate(&self, plate: &VehicleId) -> StorageResult<Option<Vehicle>> {
        let vehicle = sqlx::query_as::<_, Vehicle>(
            r#"
            SELECT id, plate, model, active, created_at
            FROM vehicles
            WHERE plate = ?
            "#,
        )
        .bind(plate.as_str())
        .fetch_optional(&self.pool)
        .await?;

        Ok(vehicle)
    }

    async fn find_all_active(&self) -> StorageResult<Vec<Vehicle>> {
        let vehicles = sqlx::query_as::<_, Vehicle>(
            r#"
            SELECT id, plate, model, active, created_at
            FROM vehicles
            WHERE active = 1
            ORDER BY plate
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(vehicles)
    }

    async fn create(&self, vehicle: &Vehicle) -> StorageResult<i64> {
        let result = sqlx::query(
            r#"
            INSERT INTO vehicles (plate, model, active)
            VALUES (?, ?, ?)
            "#,
        )
        .bind(&vehicle.plate)
        .bind(&vehicle.model)
        .bind(vehicle.active)
        .execute(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => StorageError::AlreadyExists {
                entity_type: "Vehicle".to_string(),
                field: "plate".to_string(),
                value: vehicle.plate.clone(),
            },
            _ => StorageError::Database(e),
        })?;

        tracing::info!(plate = %vehicle.plate, "Registered vehicle");
        Ok(result.last_insert_rowid())
    }

    async fn set_active(&self, plate: &VehicleId, active: bool) -> StorageResult<()> {
        let result = sqlx::query("UPDATE vehicles SET active = ? WHERE plate = ?")
            .bind(active)
            .bind(plate.as_str())
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::vehicle_not_found(plate.as_str()));
        }

        Ok(())
    }

    async fn exists_active(&self, plate: &VehicleId) -> StorageResult<bool> {
        let result: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM vehicles WHERE plate = ? AND active = 1")
                .bind(plate.as_str())
                .fetch_one(&self.pool)
                .await?;

        Ok(result.0 > 0)
    }
}
