//! Integration tests for the database, pooling and the reservation store
//!
//! Run with: cargo test --package rentdesk-storage --test integration_database

use chrono::NaiveDate;
use rentdesk_core::{DateInterval, ErrorKind, ReservationRecord, ReservationStore, VehicleId};
use rentdesk_storage::connection::{Database, DatabaseConfig};
use rentdesk_storage::models::Vehicle;
use rentdesk_storage::repositories::{SqliteVehicleRepository, VehicleRepository};
use rentdesk_storage::SqliteReservationStore;
use std::sync::Arc;
use tokio::sync::Barrier;

fn jan(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, day).unwrap()
}

async fn register(db: &Database, plate: &str) -> VehicleId {
    let id = VehicleId::new(plate).unwrap();
    SqliteVehicleRepository::new(db.pool().clone())
        .create(&Vehicle::new(id.clone(), None))
        .await
        .unwrap();
    id
}

#[tokio::test]
async fn test_in_memory_database() {
    let db = Database::in_memory().await.unwrap();
    db.health_check().await.unwrap();
    db.close().await;
}

#[tokio::test]
async fn test_concurrent_reads() {
    let db = Database::in_memory().await.unwrap();

    const NUM_CONCURRENT_TASKS: usize = 10;
    let barrier = Arc::new(Barrier::new(NUM_CONCURRENT_TASKS));

    let mut handles = vec![];

    for i in 0..NUM_CONCURRENT_TASKS {
        let db_clone = db.clone();
        let barrier_clone = barrier.clone();

        let handle = tokio::spawn(async move {
            barrier_clone.wait().await;

            let result: Result<(i64,), sqlx::Error> = sqlx::query_as("SELECT ?")
                .bind(i as i64)
                .fetch_one(db_clone.pool())
                .await;

            result.unwrap()
        });

        handles.push(handle);
    }

    let results: Vec<_> = futures::future::join_all(handles).await;

    assert_eq!(results.len(), NUM_CONCURRENT_TASKS);
    for (i, result) in results.into_iter().enumerate() {
        let value = result.unwrap();
        assert_eq!(value.0, i as i64);
    }

    db.close().await;
}

#[tokio::test]
async fn test_migration_idempotency() {
    let db = Database::in_memory().await.unwrap();

    db.migrate().await.unwrap();
    db.migrate().await.unwrap();

    for table in ["vehicles", "reservations"] {
        let result: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name=?")
                .bind(table)
                .fetch_one(db.pool())
                .await
                .unwrap();
        assert_eq!(result.0, 1, "table {table} missing");
    }

    db.close().await;
}

#[tokio::test]
async fn test_reservations_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fleet.db");
    let path = path.to_str().unwrap();

    {
        let db = Database::new(DatabaseConfig::new(path)).await.unwrap();
        let car = register(&db, "A001AA").await;
        let store = SqliteReservationStore::new(db.pool().clone());
        let record = ReservationRecord::new(car, DateInterval::new(jan(6), jan(10)).unwrap(), 4950.0);
        store.insert(&record, record.interval).await.unwrap();
        db.close().await;
    }

    let db = Database::new(DatabaseConfig::new(path)).await.unwrap();
    let store = SqliteReservationStore::new(db.pool().clone());
    let car = VehicleId::new("A001AA").unwrap();
    assert_eq!(store.find_overlapping(&car, jan(8), jan(8)).await.unwrap(), 1);
    db.close().await;
}

#[tokio::test]
async fn test_concurrent_bookings_admit_exactly_one() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("race.db");
    let db = Database::new(DatabaseConfig::new(path.to_str().unwrap()).max_connections(8))
        .await
        .unwrap();
    let car = register(&db, "A001AA").await;

    const NUM_CONCURRENT_TASKS: usize = 8;
    let barrier = Arc::new(Barrier::new(NUM_CONCURRENT_TASKS));
    let store = Arc::new(SqliteReservationStore::new(db.pool().clone()));

    let mut handles = vec![];
    for offset in 0..NUM_CONCURRENT_TASKS as u32 {
        let store = store.clone();
        let barrier = barrier.clone();
        let car = car.clone();

        handles.push(tokio::spawn(async move {
            // Every request lands inside the others' buffered windows
            let interval = DateInterval::new(jan(10 + offset % 2), jan(14)).unwrap();
            let record = ReservationRecord::new(car, interval, 5000.0);
            barrier.wait().await;
            store.insert(&record, interval.padded(3).unwrap()).await
        }));
    }

    let results: Vec<_> = futures::future::join_all(handles)
        .await
        .into_iter()
        .map(|joined| joined.unwrap())
        .collect();

    let successes = results.iter().filter(|r| r.is_ok()).count();
    assert_eq!(successes, 1);
    for err in results.iter().filter_map(|r| r.as_ref().err()) {
        assert_eq!(err.kind(), ErrorKind::Store, "unexpected error: {err}");
    }

    let stored: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM reservations")
        .fetch_one(db.pool())
        .await
        .unwrap();
    assert_eq!(stored.0, 1);

    db.close().await;
}

#[tokio::test]
async fn test_sequential_transactions() {
    let db = Database::in_memory().await.unwrap();
    register(&db, "A001AA").await;

    for (start, end) in [("2025-01-06", "2025-01-07"), ("2025-01-20", "2025-01-21")] {
        let mut tx = db.pool().begin().await.unwrap();
        sqlx::query(
            "INSERT INTO reservations (vehicle_plate, start_date, end_date, cost) VALUES (?, ?, ?, ?)",
        )
        .bind("A001AA")
        .bind(start)
        .bind(end)
        .bind(2000.0)
        .execute(&mut *tx)
        .await
        .unwrap();
        tx.commit().await.unwrap();
    }

    let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM reservations WHERE vehicle_plate = 'A001AA'")
        .fetch_one(db.pool())
        .await
        .unwrap();
    assert_eq!(count.0, 2);

    db.close().await;
}
