//! JSON file record store

use super::records::Dataset;
use super::{convert_all, set_driver_hours, RecordStore, StoreError};
use crate::models::{Driver, Order, Route};
use parking_lot::Mutex;
use std::fs;
use std::path::{Path, PathBuf};

/// Dataset kept in a single JSON file
///
/// The file is read on every fetch, so changes made by other processes are
/// seen by the next run. Each driver update rewrites the whole file through
/// a sibling temporary file and a rename.
///
/// File format:
///
/// ```json
/// {
///   "orders":  [{"orderId": "O1", "valueRs": 500, "route": "R1", "createdAt": "2025-01-06T09:00:00Z"}],
///   "drivers": [{"id": "D1", "name": "Asha", "currentShiftHours": 2.5}],
///   "routes":  [{"routeId": "R1", "distanceKm": 10, "trafficLevel": "Low", "baseTimeMin": 30}]
/// }
/// ```
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    /// Open an existing dataset file, checking that it parses
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let store = Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        };
        store.load()?;
        Ok(store)
    }

    /// Create (or overwrite) a dataset file
    pub fn create(path: impl Into<PathBuf>, dataset: &Dataset) -> Result<Self, StoreError> {
        let store = Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        };
        store.save(dataset)?;
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and parse the dataset file
    pub fn load(&self) -> Result<Dataset, StoreError> {
        let text = fs::read_to_string(&self.path).map_err(|source| self.io_error(source))?;
        Ok(serde_json::from_str(&text)?)
    }

    fn save(&self, dataset: &Dataset) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(dataset)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json).map_err(|source| self.io_error(source))?;
        fs::rename(&tmp, &self.path).map_err(|source| self.io_error(source))
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl RecordStore for JsonFileStore {
    fn fetch_orders(&self) -> Result<Vec<Order>, StoreError> {
        convert_all(&self.load()?.orders, |r| r.to_order())
    }

    fn fetch_drivers(&self) -> Result<Vec<Driver>, StoreError> {
        convert_all(&self.load()?.drivers, |r| r.to_driver())
    }

    fn fetch_routes(&self) -> Result<Vec<Route>, StoreError> {
        convert_all(&self.load()?.routes, |r| r.to_route())
    }

    fn update_driver_hours(&self, driver_id: &str, hours: f64) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock();
        let mut dataset = self.load()?;
        set_driver_hours(&mut dataset, driver_id, hours)?;
        self.save(&dataset)
    }
}
