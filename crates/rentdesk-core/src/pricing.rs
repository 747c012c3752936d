//! Tiered rental pricing.
//!
//! The daily rate drops as a rental gets longer. The discount applies to the
//! *day index within the rental*, not to the whole stay: a 20-day rental pays
//! the full rate for its first four days, 95 % for days 5-9, 90 % for days
//! 10-17 and 85 % for days 18-20.
//!
//! Costs are computed without a per-day floating point running sum. Each day
//! contributes its integer multiplier percentage to an accumulator and the
//! base cost is applied once at the end, so `calculate_cost(n, base)` is the
//! same value however large `n` gets.
//!
//! ```
//! use rentdesk_core::pricing::calculate_cost;
//!
//! assert_eq!(calculate_cost(4, 1000.0).unwrap(), 4000.0);
//! assert_eq!(calculate_cost(9, 1000.0).unwrap(), 8750.0);
//! assert_eq!(calculate_cost(20, 1000.0).unwrap(), 18500.0);
//! ```

use crate::{
    Error, Result,
    constants::{PERCENT_BASE, STANDARD_TIERS},
};
use serde::{Deserialize, Serialize};

/// One discount band of a [`PricingSchedule`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingTier {
    /// First rental day (1-based) the tier applies to.
    pub first_day: u32,
    /// Last rental day of the tier, `None` for the open-ended final tier.
    pub last_day: Option<u32>,
    /// Share of the base daily cost charged per day, in percent.
    pub multiplier_percent: u32,
}

impl PricingTier {
    #[must_use]
    pub const fn new(first_day: u32, last_day: Option<u32>, multiplier_percent: u32) -> Self {
        Self {
            first_day,
            last_day,
            multiplier_percent,
        }
    }

    /// Days of the first `days` rental days that fall in this tier.
    fn days_within(&self, days: u32) -> u32 {
        if days < self.first_day {
            return 0;
        }
        let last = self.last_day.map_or(days, |last| last.min(days));
        last - self.first_day + 1
    }
}

/// Ordered pricing tiers covering every rental day from 1 upwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PricingSchedule {
    tiers: Vec<PricingTier>,
}

impl PricingSchedule {
    /// Build a schedule from tiers.
    ///
    /// # Errors
    /// Returns `Error::InvalidInput` unless the tiers are contiguous, start at
    /// day 1 and end with a single open-ended tier.
    pub fn new(tiers: Vec<PricingTier>) -> Result<Self> {
        let Some(first) = tiers.first() else {
            return Err(Error::InvalidInput("Pricing schedule has no tiers".into()));
        };
        if first.first_day != 1 {
            return Err(Error::InvalidInput(format!(
                "First pricing tier must start at day 1, starts at {}",
                first.first_day
            )));
        }

        let mut expected_start = 1;
        for (index, tier) in tiers.iter().enumerate() {
            if tier.first_day != expected_start {
                return Err(Error::InvalidInput(format!(
                    "Pricing tier {index} starts at day {}, expected {expected_start}",
                    tier.first_day
                )));
            }
            match tier.last_day {
                Some(last) if last < tier.first_day => {
                    return Err(Error::InvalidInput(format!(
                        "Pricing tier {index} ends at day {last} before it starts"
                    )));
                }
                Some(last) => expected_start = last + 1,
                None if index + 1 != tiers.len() => {
                    return Err(Error::InvalidInput(format!(
                        "Only the last pricing tier may be open-ended, tier {index} is"
                    )));
                }
                None => {}
            }
        }

        if tiers.last().is_some_and(|tier| tier.last_day.is_some()) {
            return Err(Error::InvalidInput(
                "Last pricing tier must be open-ended".into(),
            ));
        }

        Ok(Self { tiers })
    }

    /// The fixed four-tier schedule.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            tiers: STANDARD_TIERS
                .iter()
                .map(|&(first, last, percent)| PricingTier::new(first, last, percent))
                .collect(),
        }
    }

    #[must_use]
    pub fn tiers(&self) -> &[PricingTier] {
        &self.tiers
    }

    /// Total cost of a rental of `days` days at `base_cost` per day.
    ///
    /// # Errors
    /// Returns `Error::InvalidInput` if `days` is negative or `base_cost` is
    /// negative or not finite.
    pub fn cost(&self, days: i64, base_cost: f64) -> Result<f64> {
        if days < 0 {
            return Err(Error::InvalidInput(format!(
                "Rental days must not be negative, got {days}"
            )));
        }
        if !base_cost.is_finite() || base_cost < 0.0 {
            return Err(Error::InvalidInput(format!(
                "Base cost must be a non-negative number, got {base_cost}"
            )));
        }
        let days = u32::try_from(days)
            .map_err(|_| Error::InvalidInput(format!("Rental of {days} days is out of range")))?;

        let percent_points: u64 = self
            .tiers
            .iter()
            .map(|tier| u64::from(tier.days_within(days)) * u64::from(tier.multiplier_percent))
            .sum();

        Ok(percent_points as f64 * base_cost / f64::from(PERCENT_BASE))
    }
}

impl Default for PricingSchedule {
    fn default() -> Self {
        Self::standard()
    }
}

/// Cost of a rental of `days` days under the standard schedule.
///
/// # Errors
/// Returns `Error::InvalidInput` if `days < 0` or `base_cost` is invalid.
pub fn calculate_cost(days: i64, base_cost: f64) -> Result<f64> {
    PricingSchedule::standard().cost(days, base_cost)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, 0.0)]
    #[case(1, 1000.0)]
    #[case(4, 4000.0)]
    #[case(5, 4950.0)]
    #[case(9, 8750.0)]
    #[case(10, 9650.0)]
    #[case(17, 15950.0)]
    #[case(18, 16800.0)]
    #[case(20, 18500.0)]
    #[case(30, 27000.0)]
    fn test_standard_cost(#[case] days: i64, #[case] expected: f64) {
        assert_eq!(calculate_cost(days, 1000.0).unwrap(), expected);
    }

    #[rstest]
    #[case(0.0)]
    #[case(1.0)]
    #[case(1234.56)]
    fn test_zero_days_is_free(#[case] base: f64) {
        assert_eq!(calculate_cost(0, base).unwrap(), 0.0);
    }

    #[test]
    fn test_negative_days_rejected() {
        assert!(matches!(
            calculate_cost(-1, 1000.0),
            Err(Error::InvalidInput(_))
        ));
    }

    #[rstest]
    #[case(-1.0)]
    #[case(f64::NAN)]
    #[case(f64::INFINITY)]
    fn test_invalid_base_cost_rejected(#[case] base: f64) {
        assert!(matches!(calculate_cost(3, base), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_large_rental_has_no_drift() {
        // 4*100 + 5*95 + 8*90 + (100_000 - 17)*85 percent points
        let expected = (400 + 475 + 720 + 99_983 * 85) as f64 * 10.0 / 100.0;
        assert_eq!(calculate_cost(100_000, 10.0).unwrap(), expected);
    }

    #[rstest]
    #[case(1, 100)]
    #[case(4, 100)]
    #[case(5, 95)]
    #[case(9, 95)]
    #[case(10, 90)]
    #[case(17, 90)]
    #[case(18, 85)]
    #[case(365, 85)]
    fn test_marginal_day_price(#[case] day: i64, #[case] percent: u32) {
        // Adding day N to an (N-1)-day rental costs that day's tier rate
        let schedule = PricingSchedule::standard();
        let added = schedule.cost(day, 1000.0).unwrap() - schedule.cost(day - 1, 1000.0).unwrap();
        assert_eq!(added, f64::from(percent) * 10.0);
    }

    #[test]
    fn test_custom_schedule() {
        let schedule = PricingSchedule::new(vec![
            PricingTier::new(1, Some(2), 100),
            PricingTier::new(3, None, 50),
        ])
        .unwrap();
        assert_eq!(schedule.cost(4, 200.0).unwrap(), 600.0);
    }

    #[rstest]
    #[case::empty(vec![])]
    #[case::not_from_day_one(vec![PricingTier::new(2, None, 100)])]
    #[case::gap(vec![PricingTier::new(1, Some(3), 100), PricingTier::new(5, None, 90)])]
    #[case::overlap(vec![PricingTier::new(1, Some(3), 100), PricingTier::new(3, None, 90)])]
    #[case::closed_end(vec![PricingTier::new(1, Some(3), 100)])]
    #[case::open_in_middle(vec![PricingTier::new(1, None, 100), PricingTier::new(4, None, 90)])]
    #[case::reversed(vec![PricingTier::new(1, Some(0), 100), PricingTier::new(1, None, 90)])]
    fn test_invalid_schedules(#[case] tiers: Vec<PricingTier>) {
        assert!(matches!(
            PricingSchedule::new(tiers),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_standard_schedule_passes_validation() {
        let standard = PricingSchedule::standard();
        assert_eq!(
            PricingSchedule::new(standard.tiers().to_vec()).unwrap(),
            standard
        );
    }
}
