//! Storage layer for the rentdesk reservation system.
//!
//! SQLite-backed persistence for the fleet registry and confirmed
//! reservations, plus [`SqliteReservationStore`], the implementation of
//! [`rentdesk_core::ReservationStore`] used by the booking service.
//!
//! # Architecture
//!
//! - [`Database`] - Connection pool manager with automatic migrations
//! - [`VehicleRepository`], [`ReservationRepository`] - Data access traits
//! - [`transaction`] - Check-then-insert inside one transaction
//! - [`SqliteReservationStore`] - The store contract on top of the above
//!
//! # Invariants
//!
//! No two reservations of the same vehicle share a day. The store checks the
//! buffer-padded guard window inside the insert transaction, and the
//! `reservations_no_overlap` trigger rejects raw overlaps from any other path.
//! Dates are stored as `YYYY-MM-DD` text so lexical comparison is calendar
//! comparison.
//!
//! # Examples
//!
//! ```no_run
//! use rentdesk_storage::{Database, DatabaseConfig, SqliteReservationStore};
//! use rentdesk_storage::repositories::{SqliteVehicleRepository, VehicleRepository};
//! use rentdesk_storage::models::Vehicle;
//! use rentdesk_core::{ReservationStore, VehicleId};
//! use chrono::NaiveDate;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let db = Database::new(DatabaseConfig::new("rentdesk.db")).await?;
//!
//! let vehicles = SqliteVehicleRepository::new(db.pool().clone());
//! let plate = VehicleId::new("A001AA")?;
//! vehicles.create(&Vehicle::new(plate.clone(), Some("Compact".into()))).await?;
//!
//! let store = SqliteReservationStore::new(db.pool().clone());
//! let day = NaiveDate::from_ymd_opt(2025, 1, 6).unwrap();
//! let conflicts = store.find_overlapping(&plate, day, day).await?;
//! assert_eq!(conflicts, 0);
//! # Ok(())
//! # }
//! ```

pub mod connection;
pub mod error;
pub mod models;
pub mod repositories;
pub mod store;
pub mod transaction;

pub use connection::{Database, DatabaseConfig};
pub use error::{StorageError, StorageResult};
pub use models::{Reservation, Vehicle};
pub use repositories::{
    ReservationRepository, SqliteReservationRepository, SqliteVehicleRepository, VehicleRepository,
};
pub use store::SqliteReservationStore;
