use anyhow::Context;
use chrono::Local;
use clap::Parser;
use rentdesk_booking::BookingService;
use rentdesk_core::VehicleId;
use rentdesk_storage::models::Vehicle;
use rentdesk_storage::repositories::{
    ReservationRepository, SqliteReservationRepository, SqliteVehicleRepository, VehicleRepository,
};
use rentdesk_storage::{Database, SqliteReservationStore};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

mod cli;
mod settings;

use cli::{Cli, Command, VehicleCommand};
use settings::Settings;

const CRATES: [&str; 4] = ["rentdesk", "rentdesk_core", "rentdesk_storage", "rentdesk_booking"];

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let directives: Vec<String> = CRATES.iter().map(|c| format!("{c}={level}")).collect();
        EnvFilter::new(directives.join(","))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn run_vehicle_command(db: &Database, command: VehicleCommand) -> anyhow::Result<()> {
    let vehicles = SqliteVehicleRepository::new(db.pool().clone());
    match command {
        VehicleCommand::Add { plate, model } => {
            let plate = VehicleId::new(&plate)?;
            vehicles.create(&Vehicle::new(plate.clone(), model)).await?;
            let created = vehicles
                .find_by_plate(&plate)
                .await?
                .with_context(|| format!("vehicle {plate} vanished after insert"))?;
            print_json(&created)
        }
        VehicleCommand::List => print_json(&vehicles.find_all_active().await?),
        VehicleCommand::Retire { plate } => {
            let plate = VehicleId::new(&plate)?;
            vehicles.set_active(&plate, false).await?;
            tracing::info!(%plate, "Vehicle retired");
            Ok(())
        }
        VehicleCommand::Reservations { plate } => {
            let plate = VehicleId::new(&plate)?;
            if vehicles.find_by_plate(&plate).await?.is_none() {
                anyhow::bail!("vehicle {plate} is not registered");
            }
            let reservations = SqliteReservationRepository::new(db.pool().clone())
                .find_by_vehicle(&plate)
                .await?;
            print_json(&reservations)
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let settings = Settings::load(cli.config.as_deref()).context("failed to load settings")?;
    init_logging(&settings.log.level);

    let db = Database::new(settings.database)
        .await
        .context("failed to open reservation database")?;

    let result = match cli.command {
        Command::Vehicle(vehicle) => run_vehicle_command(&db, vehicle.command).await,
        command => {
            let operation = command
                .into_operation(Local::now().date_naive())
                .context("invalid operation JSON")?
                .context("command is not a booking operation")?;
            let service =
                BookingService::new(SqliteReservationStore::new(db.pool().clone()), settings.service)?;
            let outcome = service.dispatch(operation).await?;
            print_json(&outcome)
        }
    };

    db.close().await;
    result
}
