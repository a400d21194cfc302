//! PyO3 wrapper for Simulator

use pyo3::prelude::*;
use pyo3::types::{PyDict, PyList};

use super::types::{parse_dataset, parse_request, parse_rules, report_to_py, to_py_err};
use crate::orchestrator::Simulator;
use crate::store::{InMemoryStore, RecordStore};

/// Python wrapper for the Rust simulator
///
/// Holds its own in-memory store; driver hours persist across `run` calls
/// on the same instance.
#[pyclass(name = "Simulator")]
pub struct PySimulator {
    inner: Simulator<InMemoryStore>,
}

#[pymethods]
impl PySimulator {
    /// Create a simulator from lists of order, driver and route dicts
    ///
    /// # Errors
    ///
    /// Raises ValueError if a field has the wrong type or the rules are invalid
    #[new]
    #[pyo3(signature = (orders, drivers, routes, rules=None))]
    fn new(
        orders: &Bound<'_, PyList>,
        drivers: &Bound<'_, PyList>,
        routes: &Bound<'_, PyList>,
        rules: Option<&Bound<'_, PyDict>>,
    ) -> PyResult<Self> {
        let store = InMemoryStore::new(parse_dataset(orders, drivers, routes)?);
        let inner = match rules {
            Some(py_rules) => Simulator::with_rules(store, parse_rules(py_rules)?).map_err(to_py_err)?,
            None => Simulator::new(store),
        };
        Ok(PySimulator { inner })
    }

    /// Run a simulation and persist driver hours
    ///
    /// # Returns
    ///
    /// Dictionary with `totalProfit`, `efficiencyScore`, `onTimeDeliveries`,
    /// `lateDeliveries`, `fuelCosts`, `totalOrders`, `totalDrivers`,
    /// `totalRoutes` and `averageOrderValue`
    ///
    /// # Errors
    ///
    /// - ValueError: malformed request field
    /// - LookupError: no orders, drivers or routes
    /// - RuntimeError: anything else, including failed write-back
    fn run(&self, py: Python<'_>, request: &Bound<'_, PyDict>) -> PyResult<Py<PyDict>> {
        let request = parse_request(request)?;
        let report = py
            .allow_threads(|| self.inner.run(&request))
            .map_err(to_py_err)?;
        report_to_py(py, &report)
    }

    /// Same as `run`, without writing driver hours
    fn preview(&self, py: Python<'_>, request: &Bound<'_, PyDict>) -> PyResult<Py<PyDict>> {
        let request = parse_request(request)?;
        let report = py
            .allow_threads(|| self.inner.preview(&request))
            .map_err(to_py_err)?;
        report_to_py(py, &report)
    }

    /// Current cumulative shift hours by driver id
    fn driver_hours(&self, py: Python<'_>) -> PyResult<Py<PyDict>> {
        let drivers = self
            .inner
            .store()
            .fetch_drivers()
            .map_err(|e| PyErr::new::<pyo3::exceptions::PyRuntimeError, _>(e.to_string()))?;

        let dict = PyDict::new(py);
        for driver in drivers {
            dict.set_item(driver.id(), driver.current_shift_hours())?;
        }
        Ok(dict.unbind())
    }
}
