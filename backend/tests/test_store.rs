//! JSON file store: loading, record validation and driver write-back

use delivery_simulator_core_rs::store::{Dataset, StoreError};
use delivery_simulator_core_rs::{
    JsonFileStore, RecordStore, SimulationRequest, Simulator, TrafficLevel,
};
use std::fs;
use tempfile::TempDir;

const DATASET: &str = r#"{
  "orders": [
    {"orderId": "O1", "valueRs": 500, "route": "R1", "createdAt": "2025-01-06T09:00:00Z"},
    {"orderId": "O2", "valueRs": 1500, "route": "R2", "createdAt": "2025-01-06T09:05:00Z",
     "deliveryTimestamp": "2025-01-06T09:40:00Z"}
  ],
  "drivers": [
    {"_id": "D1", "name": "Asha", "currentShiftHours": 1.5, "pastWeekHours": [6, 8, 7]},
    {"id": "D2", "name": "Ravi"}
  ],
  "routes": [
    {"routeId": "R1", "distanceKm": 10, "trafficLevel": "Low", "baseTimeMin": 30},
    {"routeId": "R2", "distanceKm": 20, "baseTimeMin": 40}
  ]
}"#;

fn write_dataset(dir: &TempDir, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join("fleet.json");
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn test_open_and_fetch() {
    let dir = TempDir::new().unwrap();
    let store = JsonFileStore::open(write_dataset(&dir, DATASET)).unwrap();

    let orders = store.fetch_orders().unwrap();
    assert_eq!(orders.len(), 2);
    assert_eq!(orders[1].observed_minutes(), Some(35.0));

    let drivers = store.fetch_drivers().unwrap();
    assert_eq!(drivers[0].id(), "D1");
    assert_eq!(drivers[0].past_week_hours(), &[6.0, 8.0, 7.0]);
    assert_eq!(drivers[1].current_shift_hours(), 0.0);

    let routes = store.fetch_routes().unwrap();
    assert_eq!(routes[1].traffic, TrafficLevel::Low);
}

#[test]
fn test_missing_file() {
    let dir = TempDir::new().unwrap();
    let err = JsonFileStore::open(dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, StoreError::Io { .. }));
}

#[test]
fn test_malformed_file() {
    let dir = TempDir::new().unwrap();
    let err = JsonFileStore::open(write_dataset(&dir, "{\"orders\": [")).unwrap_err();
    assert!(matches!(err, StoreError::Serialization(_)));
}

#[test]
fn test_invalid_record_surfaces_on_fetch() {
    let dir = TempDir::new().unwrap();
    let path = write_dataset(
        &dir,
        r#"{"routes": [{"routeId": "R1", "distanceKm": 10, "trafficLevel": "Jammed", "baseTimeMin": 30}]}"#,
    );
    let store = JsonFileStore::open(path).unwrap();

    match store.fetch_routes().unwrap_err() {
        StoreError::InvalidRecord { index, .. } => assert_eq!(index, 0),
        other => panic!("expected invalid record, got {other:?}"),
    }
    assert!(store.fetch_orders().unwrap().is_empty());
}

#[test]
fn test_update_driver_hours_rewrites_file() {
    let dir = TempDir::new().unwrap();
    let path = write_dataset(&dir, DATASET);
    let store = JsonFileStore::open(&path).unwrap();

    store.update_driver_hours("D2", 3.25).unwrap();

    let reopened = JsonFileStore::open(&path).unwrap();
    let drivers = reopened.fetch_drivers().unwrap();
    assert_eq!(drivers[1].current_shift_hours(), 3.25);
    assert_eq!(drivers[0].current_shift_hours(), 1.5);
    assert!(!path.with_extension("json.tmp").exists());

    assert!(matches!(
        store.update_driver_hours("D9", 1.0),
        Err(StoreError::DriverNotFound(_))
    ));
}

#[test]
fn test_create_then_open() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("new.json");
    let store = JsonFileStore::create(&path, &Dataset::default()).unwrap();
    assert_eq!(store.path(), path.as_path());
    assert!(store.fetch_drivers().unwrap().is_empty());
    assert!(JsonFileStore::open(&path).is_ok());
}

#[test]
fn test_simulation_against_file_store() {
    let dir = TempDir::new().unwrap();
    let path = write_dataset(&dir, DATASET);
    let simulator = Simulator::new(JsonFileStore::open(&path).unwrap());

    let report = simulator.run(&SimulationRequest::new(2, "09:00", 8.0)).unwrap();

    // O1: 500 - 50 on D1; O2: observed 35 min on a 40 min route, 1500 + 150 - 100 on D2
    assert_eq!(report.result.total_profit, 2000.0);
    assert_eq!(report.result.on_time_deliveries, 2);
    assert_eq!(report.result.fuel_costs.low, 150.0);

    let drivers = JsonFileStore::open(&path).unwrap().fetch_drivers().unwrap();
    assert_eq!(drivers[0].current_shift_hours(), 2.0);
    assert!((drivers[1].current_shift_hours() - 35.0 / 60.0).abs() < 1e-9);
}
