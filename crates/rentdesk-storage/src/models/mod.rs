pub mod reservation;
pub mod vehicle;

pub use reservation::Reservation;
pub use vehicle::Vehicle;
