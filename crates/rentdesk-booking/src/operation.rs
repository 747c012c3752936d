//! Enumerated requests accepted by [`BookingService::dispatch`](crate::BookingService::dispatch).

use rentdesk_core::{ReportMonth, UtilizationReport};
use serde::{Deserialize, Serialize};

/// A request to the booking service.
///
/// Dates stay raw strings so that parsing errors are reported by the service
/// in the same order as for direct calls.
///
/// ```
/// use rentdesk_booking::Operation;
///
/// let op: Operation = serde_json::from_str(
///     r#"{"op": "book", "vehicle": "A001AA", "start": "2025-01-06", "end": "2025-01-10"}"#,
/// ).unwrap();
/// assert!(matches!(op, Operation::Book { .. }));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Operation {
    Quote {
        days: i64,
    },
    Book {
        vehicle: String,
        start: String,
        end: String,
    },
    CheckAvailability {
        vehicle: String,
        start: String,
        end: String,
    },
    Report {
        month: ReportMonth,
    },
}

impl Operation {
    /// Short name used in log records.
    pub fn name(&self) -> &'static str {
        match self {
            Operation::Quote { .. } => "quote",
            Operation::Book { .. } => "book",
            Operation::CheckAvailability { .. } => "check_availability",
            Operation::Report { .. } => "report",
        }
    }
}

/// Successful result of an [`Operation`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    Quote { cost: f64 },
    Booked { cost: f64 },
    Availability { available: bool },
    Report(UtilizationReport),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_operation_parses_month() {
        let op: Operation = serde_json::from_str(r#"{"op": "report", "month": "2025-02"}"#).unwrap();
        assert_eq!(
            op,
            Operation::Report {
                month: ReportMonth::new(2025, 2).unwrap()
            }
        );
        assert_eq!(op.name(), "report");
    }

    #[test]
    fn test_bad_month_is_rejected_at_parse() {
        let result = serde_json::from_str::<Operation>(r#"{"op": "report", "month": "2025-13"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_outcome_is_tagged() {
        let json = serde_json::to_value(Outcome::Booked { cost: 4950.0 }).unwrap();
        assert_eq!(json["outcome"], "booked");
        assert_eq!(json["cost"], 4950.0);
    }
}
