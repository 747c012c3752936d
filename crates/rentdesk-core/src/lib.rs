//! Booking core for the rentdesk vehicle rental service.
//!
//! Validation, pricing, availability and reporting rules, free of I/O except
//! for the single awaited [`ReservationStore`] call made by
//! [`availability::is_available`].

pub mod availability;
pub mod constants;
pub mod error;
pub mod mock;
pub mod pricing;
pub mod report;
pub mod store;
pub mod types;
pub mod validation;

pub use error::{Error, ErrorKind, Result};
pub use pricing::{PricingSchedule, PricingTier, calculate_cost};
pub use report::{ReportSummary, UtilizationReport, build_monthly_report};
pub use store::ReservationStore;
pub use types::*;
pub use validation::{parse_and_validate, validate_request};

/// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
