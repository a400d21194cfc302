//! Type conversion utilities for FFI boundary
//!
//! Converts between Python dicts/lists and the crate's record and result
//! types. Records are read into the loosely-typed store records, so the
//! same defaults and validation apply as for any other store.

use chrono::{DateTime, Utc};
use pyo3::exceptions::{PyLookupError, PyRuntimeError, PyValueError};
use pyo3::prelude::*;
use pyo3::types::{PyDict, PyList};

use crate::orchestrator::{ErrorClass, RunReport, SimulationError, SimulationRequest};
use crate::rules::SimulationRules;
use crate::store::{Dataset, DriverRecord, OrderRecord, RouteRecord};

// ========================================================================
// PyDict Extraction Helpers
// ========================================================================

/// Extract an optional field, reporting a type mismatch as a ValueError
/// that names the field.
///
/// # Example
/// ```ignore
/// let hours: Option<f64> = extract_optional(&py_dict, "currentShiftHours")?;
/// ```
fn extract_optional<'py, T>(dict: &Bound<'py, PyDict>, key: &str) -> PyResult<Option<T>>
where
    T: FromPyObject<'py>,
{
    match dict.get_item(key)? {
        Some(value) if !value.is_none() => value
            .extract()
            .map(Some)
            .map_err(|e| PyValueError::new_err(format!("Invalid field '{}': {}", key, e))),
        _ => Ok(None),
    }
}

/// Extract a field with a default value if missing.
fn extract_with_default<'py, T>(dict: &Bound<'py, PyDict>, key: &str, default: T) -> PyResult<T>
where
    T: FromPyObject<'py>,
{
    Ok(extract_optional(dict, key)?.unwrap_or(default))
}

/// Extract an optional ISO-8601 timestamp
fn extract_timestamp(dict: &Bound<'_, PyDict>, key: &str) -> PyResult<Option<DateTime<Utc>>> {
    let Some(text) = extract_optional::<String>(dict, key)? else {
        return Ok(None);
    };
    DateTime::parse_from_rfc3339(&text)
        .map(|ts| Some(ts.with_timezone(&Utc)))
        .map_err(|e| PyValueError::new_err(format!("Invalid timestamp in '{}': {}", key, e)))
}

fn dicts<'py>(list: &Bound<'py, PyList>) -> PyResult<Vec<Bound<'py, PyDict>>> {
    list.iter()
        .map(|item| item.downcast_into::<PyDict>().map_err(PyErr::from))
        .collect()
}

// ========================================================================
// Record Parsers
// ========================================================================

fn parse_order(dict: &Bound<'_, PyDict>) -> PyResult<OrderRecord> {
    Ok(OrderRecord {
        order_id: extract_optional(dict, "orderId")?,
        value_rs: extract_optional(dict, "valueRs")?,
        route: extract_optional(dict, "route")?,
        created_at: extract_timestamp(dict, "createdAt")?,
        delivery_timestamp: extract_timestamp(dict, "deliveryTimestamp")?,
    })
}

fn parse_driver(dict: &Bound<'_, PyDict>) -> PyResult<DriverRecord> {
    let id = match extract_optional::<String>(dict, "id")? {
        Some(id) => Some(id),
        None => extract_optional(dict, "_id")?,
    };
    Ok(DriverRecord {
        id,
        name: extract_optional(dict, "name")?,
        current_shift_hours: extract_optional(dict, "currentShiftHours")?,
        past_week_hours: extract_optional(dict, "pastWeekHours")?,
    })
}

fn parse_route(dict: &Bound<'_, PyDict>) -> PyResult<RouteRecord> {
    Ok(RouteRecord {
        route_id: extract_optional(dict, "routeId")?,
        distance_km: extract_optional(dict, "distanceKm")?,
        traffic_level: extract_optional(dict, "trafficLevel")?,
        base_time_min: extract_optional(dict, "baseTimeMin")?,
    })
}

/// Convert Python lists of record dicts into a dataset
pub fn parse_dataset(
    orders: &Bound<'_, PyList>,
    drivers: &Bound<'_, PyList>,
    routes: &Bound<'_, PyList>,
) -> PyResult<Dataset> {
    Ok(Dataset {
        orders: dicts(orders)?.iter().map(parse_order).collect::<PyResult<_>>()?,
        drivers: dicts(drivers)?.iter().map(parse_driver).collect::<PyResult<_>>()?,
        routes: dicts(routes)?.iter().map(parse_route).collect::<PyResult<_>>()?,
    })
}

/// Convert Python dict to SimulationRules, defaulting missing fields
pub fn parse_rules(py_rules: &Bound<'_, PyDict>) -> PyResult<SimulationRules> {
    let defaults = SimulationRules::default();
    Ok(SimulationRules {
        fatigue_threshold_hours: extract_with_default(py_rules, "fatigue_threshold_hours", defaults.fatigue_threshold_hours)?,
        fatigue_multiplier: extract_with_default(py_rules, "fatigue_multiplier", defaults.fatigue_multiplier)?,
        grace_minutes: extract_with_default(py_rules, "grace_minutes", defaults.grace_minutes)?,
        late_penalty: extract_with_default(py_rules, "late_penalty", defaults.late_penalty)?,
        high_value_threshold: extract_with_default(py_rules, "high_value_threshold", defaults.high_value_threshold)?,
        high_value_bonus_rate: extract_with_default(py_rules, "high_value_bonus_rate", defaults.high_value_bonus_rate)?,
        fuel_cost_per_km: extract_with_default(py_rules, "fuel_cost_per_km", defaults.fuel_cost_per_km)?,
        high_traffic_surcharge_per_km: extract_with_default(
            py_rules,
            "high_traffic_surcharge_per_km",
            defaults.high_traffic_surcharge_per_km,
        )?,
    })
}

/// Convert Python dict to SimulationRequest
///
/// Only types are checked here; ranges and shapes are checked by
/// `SimulationRequest::validate` so errors read the same from every boundary.
pub fn parse_request(py_request: &Bound<'_, PyDict>) -> PyResult<SimulationRequest> {
    Ok(SimulationRequest {
        drivers: extract_optional(py_request, "drivers")?,
        start_time: extract_optional(py_request, "startTime")?,
        max_hours: extract_optional(py_request, "maxHours")?,
    })
}

// ========================================================================
// Result Conversion
// ========================================================================

/// Convert a run report to the response dict
pub fn report_to_py(py: Python<'_>, report: &RunReport) -> PyResult<Py<PyDict>> {
    let result = &report.result;
    let dict = PyDict::new(py);

    dict.set_item("totalProfit", result.total_profit)?;
    dict.set_item("efficiencyScore", result.efficiency_score)?;
    dict.set_item("onTimeDeliveries", result.on_time_deliveries)?;
    dict.set_item("lateDeliveries", result.late_deliveries)?;

    let fuel = PyDict::new(py);
    fuel.set_item("Low", result.fuel_costs.low)?;
    fuel.set_item("Medium", result.fuel_costs.medium)?;
    fuel.set_item("High", result.fuel_costs.high)?;
    dict.set_item("fuelCosts", fuel)?;

    dict.set_item("totalOrders", result.total_orders)?;
    dict.set_item("totalDrivers", result.total_drivers)?;
    dict.set_item("totalRoutes", result.total_routes)?;
    dict.set_item("averageOrderValue", result.average_order_value)?;

    Ok(dict.unbind())
}

/// Map a simulation error to the Python exception of its class
pub fn to_py_err(err: SimulationError) -> PyErr {
    let message = err.to_string();
    match err.class() {
        ErrorClass::BadRequest => PyValueError::new_err(message),
        ErrorClass::NotFound => PyLookupError::new_err(message),
        ErrorClass::Internal => PyRuntimeError::new_err(message),
    }
}
