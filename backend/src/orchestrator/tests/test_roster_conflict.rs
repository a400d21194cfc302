// A roster change between fetch and write-back aborts the run untouched.

use super::small_fleet;
use crate::models::{Driver, Order, Route};
use crate::orchestrator::{SimulationError, SimulationRequest, Simulator};
use crate::store::{InMemoryStore, RecordStore, StoreError};
use parking_lot::Mutex;

/// Store that changes D0's hours right before the second roster read
struct MeddlingStore {
    inner: InMemoryStore,
    driver_reads: Mutex<usize>,
}

impl RecordStore for MeddlingStore {
    fn fetch_orders(&self) -> Result<Vec<Order>, StoreError> {
        self.inner.fetch_orders()
    }

    fn fetch_drivers(&self) -> Result<Vec<Driver>, StoreError> {
        let mut reads = self.driver_reads.lock();
        *reads += 1;
        if *reads == 2 {
            self.inner.update_driver_hours("D0", 5.0)?;
        }
        self.inner.fetch_drivers()
    }

    fn fetch_routes(&self) -> Result<Vec<Route>, StoreError> {
        self.inner.fetch_routes()
    }

    fn update_driver_hours(&self, driver_id: &str, hours: f64) -> Result<(), StoreError> {
        self.inner.update_driver_hours(driver_id, hours)
    }
}

#[test]
fn test_external_change_aborts_persistence() {
    let store = MeddlingStore {
        inner: small_fleet(2, 2),
        driver_reads: Mutex::new(0),
    };
    let simulator = Simulator::new(store);

    let err = simulator
        .run(&SimulationRequest::new(2, "09:00", 8.0))
        .unwrap_err();
    assert!(matches!(err, SimulationError::RosterConflict { .. }));

    // The external write survives and nothing from the run was written
    let drivers = simulator.store().inner.fetch_drivers().unwrap();
    assert_eq!(drivers[0].current_shift_hours(), 5.0);
    assert_eq!(drivers[1].current_shift_hours(), 0.0);
}

#[test]
fn test_preview_skips_conflict_check() {
    let store = MeddlingStore {
        inner: small_fleet(1, 1),
        driver_reads: Mutex::new(0),
    };
    let simulator = Simulator::new(store);

    let report = simulator.preview(&SimulationRequest::new(1, "09:00", 8.0)).unwrap();
    assert!(!report.persisted);
    assert_eq!(*simulator.store().driver_reads.lock(), 1);
}
