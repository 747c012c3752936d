//! Booking orchestrator for the rentdesk reservation system.
//!
//! [`BookingService`] exposes the four operations front ends call: `quote`,
//! `book`, `check_availability` and `report`. Each is also reachable through
//! [`BookingService::dispatch`] with an [`Operation`] value. The service is
//! generic over [`rentdesk_core::ReservationStore`], so it runs unchanged over
//! the SQLite store or the in-memory mock.

mod config;
mod operation;
mod service;

pub use config::ServiceConfig;
pub use operation::{Operation, Outcome};
pub use service::BookingService;
