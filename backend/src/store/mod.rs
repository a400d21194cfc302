//! Record store
//!
//! The simulator reads orders, drivers and routes from a [`RecordStore`]
//! and writes final driver hours back to it. Stores hold loosely-typed
//! records (see [`records`]) and convert them on every fetch, so a record
//! that fails validation never reaches the simulation.
//!
//! Two stores are provided:
//! - [`InMemoryStore`]: a dataset held in memory, shared between threads
//! - [`JsonFileStore`]: a dataset kept in a JSON file, re-read on every fetch

pub mod json_file;
pub mod memory;
pub mod records;

pub use json_file::JsonFileStore;
pub use memory::InMemoryStore;
pub use records::{Dataset, DriverRecord, OrderRecord, RecordError, RouteRecord};

use crate::models::{Driver, Order, Route};
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by a record store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed dataset: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid record at position {index}: {source}")]
    InvalidRecord {
        index: usize,
        #[source]
        source: RecordError,
    },

    #[error("driver not found: {0}")]
    DriverNotFound(String),

    #[error("write rejected for driver {0}")]
    WriteRejected(String),
}

/// Source of simulation input and sink for driver hours
///
/// Methods take `&self`; implementations synchronise internally so a store
/// can be shared between simulators and threads.
pub trait RecordStore: Send + Sync {
    fn fetch_orders(&self) -> Result<Vec<Order>, StoreError>;

    /// Drivers in roster order; the first `D` are the ones a run uses
    fn fetch_drivers(&self) -> Result<Vec<Driver>, StoreError>;

    fn fetch_routes(&self) -> Result<Vec<Route>, StoreError>;

    /// Set a driver's cumulative shift hours
    fn update_driver_hours(&self, driver_id: &str, hours: f64) -> Result<(), StoreError>;
}

impl<S: RecordStore + ?Sized> RecordStore for std::sync::Arc<S> {
    fn fetch_orders(&self) -> Result<Vec<Order>, StoreError> {
        (**self).fetch_orders()
    }

    fn fetch_drivers(&self) -> Result<Vec<Driver>, StoreError> {
        (**self).fetch_drivers()
    }

    fn fetch_routes(&self) -> Result<Vec<Route>, StoreError> {
        (**self).fetch_routes()
    }

    fn update_driver_hours(&self, driver_id: &str, hours: f64) -> Result<(), StoreError> {
        (**self).update_driver_hours(driver_id, hours)
    }
}

/// Convert a record collection, tagging failures with the record position
pub(crate) fn convert_all<R, T>(
    records: &[R],
    convert: impl Fn(&R) -> Result<T, RecordError>,
) -> Result<Vec<T>, StoreError> {
    records
        .iter()
        .enumerate()
        .map(|(index, record)| {
            convert(record).map_err(|source| StoreError::InvalidRecord { index, source })
        })
        .collect()
}

/// Set `hours` on the driver record with `driver_id`
pub(crate) fn set_driver_hours(
    dataset: &mut Dataset,
    driver_id: &str,
    hours: f64,
) -> Result<(), StoreError> {
    let record = dataset
        .drivers
        .iter_mut()
        .find(|d| d.id.as_deref() == Some(driver_id))
        .ok_or_else(|| StoreError::DriverNotFound(driver_id.to_string()))?;
    record.current_shift_hours = Some(hours);
    Ok(())
}
