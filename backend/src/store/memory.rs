//! In-memory record store

use super::records::Dataset;
use super::{convert_all, set_driver_hours, RecordStore, StoreError};
use crate::models::{Driver, Order, Route};
use parking_lot::RwLock;
use std::collections::HashSet;

/// Dataset held in memory
///
/// Writes for selected drivers can be made to fail with
/// [`reject_writes_for`](InMemoryStore::reject_writes_for), which is how
/// partial persistence failures are exercised in tests.
///
/// # Example
/// ```
/// use delivery_simulator_core_rs::store::{InMemoryStore, RecordStore};
/// use delivery_simulator_core_rs::Driver;
///
/// let store = InMemoryStore::from_models(&[], &[Driver::new("D1", "Asha", 2.0)], &[]);
/// store.update_driver_hours("D1", 3.5).unwrap();
/// assert_eq!(store.fetch_drivers().unwrap()[0].current_shift_hours(), 3.5);
/// ```
#[derive(Debug, Default)]
pub struct InMemoryStore {
    data: RwLock<Dataset>,
    rejected_writes: RwLock<HashSet<String>>,
}

impl InMemoryStore {
    pub fn new(dataset: Dataset) -> Self {
        Self {
            data: RwLock::new(dataset),
            rejected_writes: RwLock::new(HashSet::new()),
        }
    }

    pub fn from_models(orders: &[Order], drivers: &[Driver], routes: &[Route]) -> Self {
        Self::new(Dataset::from_models(orders, drivers, routes))
    }

    /// Make every later write for `driver_id` fail
    pub fn reject_writes_for(&self, driver_id: impl Into<String>) {
        self.rejected_writes.write().insert(driver_id.into());
    }

    /// Copy of the stored records
    pub fn dataset(&self) -> Dataset {
        self.data.read().clone()
    }
}

impl RecordStore for InMemoryStore {
    fn fetch_orders(&self) -> Result<Vec<Order>, StoreError> {
        convert_all(&self.data.read().orders, |r| r.to_order())
    }

    fn fetch_drivers(&self) -> Result<Vec<Driver>, StoreError> {
        convert_all(&self.data.read().drivers, |r| r.to_driver())
    }

    fn fetch_routes(&self) -> Result<Vec<Route>, StoreError> {
        convert_all(&self.data.read().routes, |r| r.to_route())
    }

    fn update_driver_hours(&self, driver_id: &str, hours: f64) -> Result<(), StoreError> {
        if self.rejected_writes.read().contains(driver_id) {
            return Err(StoreError::WriteRejected(driver_id.to_string()));
        }
        set_driver_hours(&mut self.data.write(), driver_id, hours)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::records::DriverRecord;

    #[test]
    fn test_unknown_driver_update() {
        let store = InMemoryStore::default();
        assert!(matches!(
            store.update_driver_hours("nobody", 1.0),
            Err(StoreError::DriverNotFound(_))
        ));
    }

    #[test]
    fn test_rejected_writes() {
        let store = InMemoryStore::from_models(&[], &[Driver::new("D1", "Asha", 0.0)], &[]);
        store.reject_writes_for("D1");
        assert!(matches!(
            store.update_driver_hours("D1", 1.0),
            Err(StoreError::WriteRejected(_))
        ));
        assert_eq!(store.fetch_drivers().unwrap()[0].current_shift_hours(), 0.0);
    }

    #[test]
    fn test_invalid_record_reports_position() {
        let mut dataset = Dataset::default();
        dataset.drivers.push(DriverRecord {
            id: Some("D1".to_string()),
            name: Some("Asha".to_string()),
            ..Default::default()
        });
        dataset.drivers.push(DriverRecord::default());
        let store = InMemoryStore::new(dataset);
        assert!(matches!(
            store.fetch_drivers(),
            Err(StoreError::InvalidRecord { index: 1, .. })
        ));
    }
}
