//! Monthly utilization reports.

use crate::constants::REPORT_DECIMALS;
use crate::types::{ReportMonth, VehicleId};
use crate::{Error, Result};
use serde::Serialize;
use std::collections::BTreeMap;

/// Fleet-wide summary of a [`UtilizationReport`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportSummary {
    pub vehicle_count: usize,
    pub average_percentage: f64,
}

/// Share of the month each vehicle spent reserved, in percent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UtilizationReport {
    pub month: ReportMonth,
    pub vehicles: BTreeMap<VehicleId, f64>,
    pub summary: ReportSummary,
}

/// Round half away from zero to [`REPORT_DECIMALS`] places.
fn round_percentage(value: f64) -> f64 {
    let factor = 10f64.powi(REPORT_DECIMALS);
    (value * factor).round() / factor
}

/// Turn reserved-day counts into a utilization report.
///
/// # Errors
/// - `Error::NoData` if `occupancy` is empty
/// - `Error::InvalidInput` if `days_in_month` is zero
///
/// # Examples
///
/// ```
/// use std::collections::BTreeMap;
/// use rentdesk_core::{ReportMonth, VehicleId, report::build_monthly_report};
///
/// let month = ReportMonth::parse("2025-04").unwrap();
/// let occupancy = BTreeMap::from([(VehicleId::new("carA").unwrap(), 10)]);
///
/// let report = build_monthly_report(month, &occupancy, 30).unwrap();
/// assert_eq!(report.vehicles[&VehicleId::new("carA").unwrap()], 33.33);
/// assert_eq!(report.summary.average_percentage, 33.33);
/// ```
pub fn build_monthly_report(
    month: ReportMonth,
    occupancy: &BTreeMap<VehicleId, u32>,
    days_in_month: u32,
) -> Result<UtilizationReport> {
    if occupancy.is_empty() {
        return Err(Error::NoData {
            month: month.to_string(),
        });
    }
    if days_in_month == 0 {
        return Err(Error::InvalidInput(
            "Days in month must be greater than zero".into(),
        ));
    }

    let vehicles: BTreeMap<VehicleId, f64> = occupancy
        .iter()
        .map(|(vehicle, &days)| {
            let share = f64::from(days) / f64::from(days_in_month) * 100.0;
            (vehicle.clone(), round_percentage(share))
        })
        .collect();

    let total: f64 = vehicles.values().sum();
    let average_percentage = round_percentage(total / vehicles.len() as f64);

    Ok(UtilizationReport {
        month,
        summary: ReportSummary {
            vehicle_count: vehicles.len(),
            average_percentage,
        },
        vehicles,
    })
}
