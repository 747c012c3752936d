use thiserror::Error;

/// Message raised by the `reservations_no_overlap` trigger.
pub(crate) const OVERLAP_TRIGGER_MESSAGE: &str = "reservation overlaps an existing reservation";

/// SQLite primary result code for `SQLITE_BUSY`.
const SQLITE_BUSY: &str = "5";
/// SQLite extended result code for `SQLITE_BUSY_SNAPSHOT`.
const SQLITE_BUSY_SNAPSHOT: &str = "517";

/// Storage-specific error types for the rentdesk reservation store.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Database connection or query execution failed
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Migration execution failed
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Entity not found in database
    #[error("Entity not found: {entity_type} with {field}={value}")]
    NotFound {
        entity_type: String,
        field: String,
        value: String,
    },

    /// Entity already exists
    #[error("Entity already exists: {entity_type} with {field}={value}")]
    AlreadyExists {
        entity_type: String,
        field: String,
        value: String,
    },

    /// The reservation window was claimed by another booking
    #[error("Reservation overlaps an existing reservation of vehicle {vehicle}")]
    Overlap { vehicle: String },

    /// Another writer held or changed the database while this transaction ran
    #[error("Database busy: {0}")]
    Busy(String),

    /// Stored data failed validation on the way out
    #[error("Validation error: {0}")]
    Validation(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl StorageError {
    pub(crate) fn vehicle_not_found(plate: &str) -> Self {
        StorageError::NotFound {
            entity_type: "Vehicle".to_string(),
            field: "plate".to_string(),
            value: plate.to_string(),
        }
    }

    /// Classify a failed reservation insert.
    ///
    /// Trigger aborts become [`StorageError::Overlap`] and lock contention
    /// becomes [`StorageError::Busy`]; everything else stays a database error.
    pub(crate) fn from_insert(error: sqlx::Error, vehicle: &str) -> Self {
        if let sqlx::Error::Database(db_error) = &error {
            if db_error.message().contains(OVERLAP_TRIGGER_MESSAGE) {
                return StorageError::Overlap {
                    vehicle: vehicle.to_string(),
                };
            }
            if matches!(
                db_error.code().as_deref(),
                Some(SQLITE_BUSY | SQLITE_BUSY_SNAPSHOT)
            ) {
                return StorageError::Busy(db_error.message().to_string());
            }
        }
        StorageError::Database(error)
    }
}

/// Specialized result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

impl From<StorageError> for rentdesk_core::Error {
    fn from(error: StorageError) -> Self {
        match error {
            StorageError::NotFound {
                entity_type, value, ..
            } if entity_type == "Vehicle" => rentdesk_core::Error::VehicleNotFound(value),
            StorageError::Overlap { vehicle } => {
                rentdesk_core::Error::ConcurrentReservation { vehicle }
            }
            other => rentdesk_core::Error::Store(other.to_string()),
        }
    }
}
