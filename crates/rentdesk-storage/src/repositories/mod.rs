pub mod reservation;
pub mod vehicle;

pub use reservation::{ReservationRepository, SqliteReservationRepository};
pub use vehicle::{SqliteVehicleRepository, VehicleRepository};
