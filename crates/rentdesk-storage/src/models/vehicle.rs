use chrono::{DateTime, Utc};
use rentdesk_core::VehicleId;
use serde::{Deserialize, Serialize};

use crate::error::{StorageError, StorageResult};

/// Vehicle registered in the fleet
///
/// # Fields
///
/// * `id` - Auto-increment primary key
/// * `plate` - Unique registration plate, stored normalized (see [`VehicleId`])
/// * `model` - Free-form model description
/// * `active` - Retired vehicles stay in the table for reporting but cannot be booked
/// * `created_at` - Record creation timestamp
///
/// # Examples
///
/// ```
/// use rentdesk_storage::models::Vehicle;
/// use rentdesk_core::VehicleId;
///
/// let vehicle = Vehicle::new(VehicleId::new("a001aa").unwrap(), Some("Skoda Octavia".into()));
/// assert_eq!(vehicle.plate, "A001AA");
/// assert!(vehicle.active);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Vehicle {
    /// Auto-increment primary key
    pub id: i64,

    /// Registration plate (unique, normalized to uppercase)
    pub plate: String,

    /// Model description
    pub model: Option<String>,

    /// Whether the vehicle can currently be booked
    pub active: bool,

    /// Record creation timestamp
    pub created_at: DateTime<Utc>,
}

impl Vehicle {
    /// New, not yet persisted, active vehicle.
    pub fn new(plate: VehicleId, model: Option<String>) -> Self {
        Self {
            id: 0,
            plate: plate.into(),
            model,
            active: true,
            created_at: Utc::now(),
        }
    }

    /// The plate as a validated identifier.
    ///
    /// # Errors
    /// Returns `StorageError::Validation` if the stored plate is malformed.
    pub fn vehicle_id(&self) -> StorageResult<VehicleId> {
        VehicleId::new(&self.plate).map_err(|e| StorageError::Validation(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_vehicle_is_active_and_unsaved() {
        let vehicle = Vehicle::new(VehicleId::new("x-1").unwrap(), None);
        assert_eq!(vehicle.id, 0);
        assert_eq!(vehicle.plate, "X-1");
        assert!(vehicle.active);
        assert_eq!(vehicle.vehicle_id().unwrap().as_str(), "X-1");
    }

    #[test]
    fn test_corrupt_plate_is_validation_error() {
        let mut vehicle = Vehicle::new(VehicleId::new("x-1").unwrap(), None);
        vehicle.plate = "not a plate".into();
        assert!(matches!(
            vehicle.vehicle_id(),
            Err(StorageError::Validation(_))
        ));
    }
}
