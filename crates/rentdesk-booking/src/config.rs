use rentdesk_core::constants::{DEFAULT_BASE_COST, DEFAULT_BUFFER_DAYS, DEFAULT_MAX_RENT_PERIOD};
use rentdesk_core::{Error, Result};
use serde::{Deserialize, Serialize};

/// Business parameters of the booking service
///
/// # Example
///
/// ```
/// use rentdesk_booking::ServiceConfig;
///
/// let config = ServiceConfig::default().buffer_days(1).max_rent_period(14);
/// assert!(config.validate().is_ok());
/// assert_eq!(config.base_cost, 1000.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Price of one rental day before tier discounts
    pub base_cost: f64,

    /// Service days kept free before and after each reservation
    pub buffer_days: u32,

    /// Longest rental accepted, in days
    pub max_rent_period: u32,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_cost: DEFAULT_BASE_COST,
            buffer_days: DEFAULT_BUFFER_DAYS,
            max_rent_period: DEFAULT_MAX_RENT_PERIOD,
        }
    }
}

impl ServiceConfig {
    /// Set the daily base cost
    pub fn base_cost(mut self, cost: f64) -> Self {
        self.base_cost = cost;
        self
    }

    /// Set the service buffer
    pub fn buffer_days(mut self, days: u32) -> Self {
        self.buffer_days = days;
        self
    }

    /// Set the maximum rental period
    pub fn max_rent_period(mut self, days: u32) -> Self {
        self.max_rent_period = days;
        self
    }

    /// Check that the parameters describe a usable service.
    ///
    /// # Errors
    /// Returns `Error::InvalidInput` for a negative or non-finite base cost or
    /// a zero maximum period.
    pub fn validate(&self) -> Result<()> {
        if !self.base_cost.is_finite() || self.base_cost < 0.0 {
            return Err(Error::InvalidInput(format!(
                "base_cost must be a non-negative number, got {}",
                self.base_cost
            )));
        }
        if self.max_rent_period == 0 {
            return Err(Error::InvalidInput(
                "max_rent_period must be at least one day".into(),
            ));
        }
        Ok(())
    }
}
