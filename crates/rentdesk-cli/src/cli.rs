use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use rentdesk_booking::Operation;
use rentdesk_core::ReportMonth;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "rentdesk", version)]
#[command(about = "Vehicle rental booking desk: quotes, bookings, availability and utilization")]
pub struct Cli {
    /// Settings file (defaults to `rentdesk.toml` in the working directory, if present)
    #[arg(long, short, env = "RENTDESK_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Price a rental without booking it
    Quote {
        #[arg(long)]
        days: i64,
    },
    /// Reserve a vehicle
    Book(Period),
    /// Check whether a vehicle could be booked
    Check(Period),
    /// Monthly utilization report
    Report {
        /// Month as YYYY-MM (defaults to the current month)
        #[arg(long)]
        month: Option<ReportMonth>,
    },
    /// Run one operation given as JSON, e.g. '{"op": "quote", "days": 5}'
    Dispatch { operation: String },
    /// Manage the fleet
    Vehicle(Vehicle),
}

#[derive(Args, Debug)]
pub struct Period {
    #[arg(long)]
    pub vehicle: String,
    /// First day, YYYY-MM-DD
    #[arg(long)]
    pub start: String,
    /// Last day, YYYY-MM-DD
    #[arg(long)]
    pub end: String,
}

#[derive(Args, Debug)]
pub struct Vehicle {
    #[command(subcommand)]
    pub command: VehicleCommand,
}

#[derive(Subcommand, Debug)]
pub enum VehicleCommand {
    /// Register a vehicle
    Add {
        #[arg(long)]
        plate: String,
        #[arg(long)]
        model: Option<String>,
    },
    /// List bookable vehicles
    List,
    /// Take a vehicle out of service
    Retire {
        #[arg(long)]
        plate: String,
    },
    /// Show a vehicle's reservations, earliest first
    Reservations {
        #[arg(long)]
        plate: String,
    },
}

impl Command {
    /// The booking operation this command maps to, if any.
    ///
    /// `today` picks the month when `report` is run without `--month`.
    pub fn into_operation(self, today: NaiveDate) -> Result<Option<Operation>, serde_json::Error> {
        let operation = match self {
            Command::Quote { days } => Operation::Quote { days },
            Command::Book(p) => Operation::Book {
                vehicle: p.vehicle,
                start: p.start,
                end: p.end,
            },
            Command::Check(p) => Operation::CheckAvailability {
                vehicle: p.vehicle,
                start: p.start,
                end: p.end,
            },
            Command::Report { month } => Operation::Report {
                month: month.unwrap_or_else(|| ReportMonth::containing(today)),
            },
            Command::Dispatch { operation } => serde_json::from_str(&operation)?,
            Command::Vehicle(_) => return Ok(None),
        };
        Ok(Some(operation))
    }
}
