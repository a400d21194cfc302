//! Simulation request
//!
//! A request carries three parameters: how many drivers to use, the shift
//! start time and the per-driver hour cap. Every field is checked before
//! any data is fetched; the first offending field is named in the error.

use crate::core::StartTime;
use crate::orchestrator::SimulationError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Raw request as received from a caller
///
/// Fields are optional so that a missing field is reported the same way
/// as a malformed one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SimulationRequest {
    /// Number of drivers to use; a positive integer
    pub drivers: Option<f64>,

    /// Shift start, `HH:MM`
    pub start_time: Option<String>,

    /// Per-driver hour cap, `0 < max_hours <= 24`
    pub max_hours: Option<f64>,
}

/// Parameters of a request that passed validation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunParameters {
    pub drivers: usize,
    pub start_time: StartTime,
    pub max_hours: f64,
}

impl SimulationRequest {
    pub fn new(drivers: usize, start_time: impl Into<String>, max_hours: f64) -> Self {
        Self {
            drivers: Some(drivers as f64),
            start_time: Some(start_time.into()),
            max_hours: Some(max_hours),
        }
    }

    /// Read a request from an arbitrary JSON body.
    ///
    /// Unlike plain deserialization, a field of the wrong JSON type is
    /// reported as a validation error naming that field.
    ///
    /// # Example
    /// ```
    /// use delivery_simulator_core_rs::SimulationRequest;
    /// use serde_json::json;
    ///
    /// let body = json!({"drivers": 3, "startTime": "09:00", "maxHours": 8});
    /// let params = SimulationRequest::from_json(&body).unwrap().validate().unwrap();
    /// assert_eq!(params.drivers, 3);
    ///
    /// let err = SimulationRequest::from_json(&json!({"drivers": "3"})).unwrap_err();
    /// assert_eq!(err.field(), Some("drivers"));
    /// ```
    pub fn from_json(body: &Value) -> Result<Self, SimulationError> {
        let Some(object) = body.as_object() else {
            return Err(SimulationError::validation("body", "request body must be a JSON object"));
        };

        let number = |field: &str, message: &str| -> Result<Option<f64>, SimulationError> {
            match object.get(field) {
                None | Some(Value::Null) => Ok(None),
                Some(value) => value
                    .as_f64()
                    .map(Some)
                    .ok_or_else(|| SimulationError::validation(field, message)),
            }
        };

        let drivers = number("drivers", DRIVERS_MESSAGE)?;
        let start_time = match object.get("startTime") {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(s.clone()),
            Some(_) => return Err(SimulationError::validation("startTime", START_TIME_MESSAGE)),
        };
        let max_hours = number("maxHours", MAX_HOURS_MESSAGE)?;

        Ok(Self {
            drivers,
            start_time,
            max_hours,
        })
    }

    /// Check every field, in order `drivers`, `startTime`, `maxHours`
    pub fn validate(&self) -> Result<RunParameters, SimulationError> {
        let drivers = match self.drivers {
            Some(d) if d.is_finite() && d.fract() == 0.0 && d > 0.0 && d <= usize::MAX as f64 => {
                d as usize
            }
            _ => return Err(SimulationError::validation("drivers", DRIVERS_MESSAGE)),
        };

        let start_time = self
            .start_time
            .as_deref()
            .and_then(|s| s.parse::<StartTime>().ok())
            .ok_or_else(|| SimulationError::validation("startTime", START_TIME_MESSAGE))?;

        let max_hours = match self.max_hours {
            Some(h) if h.is_finite() && h > 0.0 && h <= 24.0 => h,
            _ => return Err(SimulationError::validation("maxHours", MAX_HOURS_MESSAGE)),
        };

        Ok(RunParameters {
            drivers,
            start_time,
            max_hours,
        })
    }
}

const DRIVERS_MESSAGE: &str = "must be a positive integer";
const START_TIME_MESSAGE: &str = "must be in HH:MM format";
const MAX_HOURS_MESSAGE: &str = "must be greater than 0 and at most 24";

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn field_of(request: SimulationRequest) -> Option<String> {
        request.validate().err().and_then(|e| e.field().map(str::to_string))
    }

    #[test]
    fn test_valid_request() {
        let params = SimulationRequest::new(4, "08:30", 24.0).validate().unwrap();
        assert_eq!(params.drivers, 4);
        assert_eq!(params.start_time.to_string(), "08:30");
        assert_eq!(params.max_hours, 24.0);
    }

    #[test]
    fn test_drivers_must_be_positive_integer() {
        for drivers in [None, Some(0.0), Some(-2.0), Some(2.5), Some(f64::NAN)] {
            let request = SimulationRequest {
                drivers,
                ..SimulationRequest::new(1, "08:00", 8.0)
            };
            assert_eq!(field_of(request).as_deref(), Some("drivers"));
        }
    }

    #[test]
    fn test_start_time_shape() {
        let request = SimulationRequest::new(1, "8:00", 8.0);
        assert_eq!(field_of(request).as_deref(), Some("startTime"));

        let request = SimulationRequest {
            start_time: None,
            ..SimulationRequest::new(1, "08:00", 8.0)
        };
        assert_eq!(field_of(request).as_deref(), Some("startTime"));
    }

    #[test]
    fn test_max_hours_range() {
        for max_hours in [0.0, -1.0, 24.01, f64::INFINITY] {
            let request = SimulationRequest::new(1, "08:00", max_hours);
            assert_eq!(field_of(request).as_deref(), Some("maxHours"));
        }
        assert!(SimulationRequest::new(1, "08:00", 0.5).validate().is_ok());
    }

    #[test]
    fn test_first_bad_field_wins() {
        let request = SimulationRequest {
            drivers: Some(0.0),
            start_time: Some("bad".to_string()),
            max_hours: Some(99.0),
        };
        assert_eq!(field_of(request).as_deref(), Some("drivers"));
    }

    #[test]
    fn test_from_json_type_errors_name_field() {
        let err = SimulationRequest::from_json(&json!({"drivers": 2, "startTime": 900})).unwrap_err();
        assert_eq!(err.field(), Some("startTime"));

        let err = SimulationRequest::from_json(&json!({"maxHours": "8"})).unwrap_err();
        assert_eq!(err.field(), Some("maxHours"));

        let err = SimulationRequest::from_json(&json!([1, 2])).unwrap_err();
        assert_eq!(err.field(), Some("body"));
    }

    #[test]
    fn test_from_json_missing_fields_fail_validation() {
        let request = SimulationRequest::from_json(&json!({})).unwrap();
        assert_eq!(field_of(request).as_deref(), Some("drivers"));
    }
}
