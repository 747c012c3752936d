//! Business constants for rental validation, pricing and reporting.
//!
//! # Duration Policy
//!
//! Rentals are counted inclusively: a vehicle picked up on Monday and returned
//! on the same Monday is rented for one day, Monday to Friday is five days.
//! [`DURATION_OFFSET_DAYS`] is added to the raw day difference everywhere a
//! duration is derived from two dates, and reservation intervals are treated
//! as closed `[start, end]` ranges when checking for overlap.
//!
//! ```
//! use rentdesk_core::constants::DURATION_OFFSET_DAYS;
//!
//! // Monday 2025-01-06 .. Friday 2025-01-10
//! let difference = 4;
//! assert_eq!(difference + DURATION_OFFSET_DAYS, 5);
//! ```

// ============================================================================
// Dates
// ============================================================================

/// Format accepted for every raw date supplied by callers.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Format of a reporting month (`2025-03`).
pub const MONTH_FORMAT: &str = "%Y-%m";

/// Offset added to `end - start` to obtain the rental duration in days.
///
/// With an offset of one, `start == end` is a legal single-day rental.
pub const DURATION_OFFSET_DAYS: i64 = 1;

// ============================================================================
// Vehicle identifiers
// ============================================================================

/// Minimum vehicle identifier (registration plate) length.
pub const MIN_VEHICLE_ID_LENGTH: usize = 1;

/// Maximum vehicle identifier (registration plate) length.
pub const MAX_VEHICLE_ID_LENGTH: usize = 20;

// ============================================================================
// Pricing
// ============================================================================

/// Multiplier percentages are expressed against this base.
pub const PERCENT_BASE: u32 = 100;

/// Standard tier boundaries: `(first_day, last_day, multiplier_percent)`.
///
/// Days 1-4 pay the full daily rate, 5-9 pay 95 %, 10-17 pay 90 % and every
/// day from the 18th on pays 85 %.
pub const STANDARD_TIERS: [(u32, Option<u32>, u32); 4] = [
    (1, Some(4), 100),
    (5, Some(9), 95),
    (10, Some(17), 90),
    (18, None, 85),
];

// ============================================================================
// Service defaults
// ============================================================================

/// Default daily rate before tier discounts.
pub const DEFAULT_BASE_COST: f64 = 1000.0;

/// Default service buffer kept free before and after each reservation.
pub const DEFAULT_BUFFER_DAYS: u32 = 3;

/// Default maximum rental duration in days.
pub const DEFAULT_MAX_RENT_PERIOD: u32 = 30;

// ============================================================================
// Reporting
// ============================================================================

/// Decimal places kept in utilization percentages.
pub const REPORT_DECIMALS: i32 = 2;
