//! Vehicle availability under a service buffer.
//!
//! A candidate interval `[start, end]` is widened to
//! `[start - buffer, end + buffer]` and the store is asked how many existing
//! reservations of the same vehicle share a day with that window. Zero means
//! the vehicle is available.
//!
//! This is a read-then-decide check. It gives no protection against a
//! concurrent writer; see [`ReservationStore`] for the contract that closes
//! that gap.

use crate::Result;
use crate::store::ReservationStore;
use crate::types::AvailabilityQuery;

/// Returns `true` if no reservation of the vehicle intersects the padded window.
///
/// # Errors
///
/// Store errors are returned unchanged, so an unknown vehicle surfaces as
/// `Error::VehicleNotFound` rather than as "unavailable".
/// `Error::InvalidInput` if the padding leaves the supported date range.
pub async fn is_available<S: ReservationStore>(query: &AvailabilityQuery, store: &S) -> Result<bool> {
    let window = query.padded_window()?;
    let conflicts = store
        .find_overlapping(&query.vehicle, window.start(), window.end())
        .await?;
    Ok(conflicts == 0)
}
