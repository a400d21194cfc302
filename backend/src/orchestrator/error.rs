//! Simulation errors and their response classes

use crate::store::StoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Input collection a run depends on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Collection {
    Orders,
    Drivers,
    Routes,
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Collection::Orders => "orders",
            Collection::Drivers => "drivers",
            Collection::Routes => "routes",
        })
    }
}

/// Errors that abort a simulation run
#[derive(Debug, Error)]
pub enum SimulationError {
    /// Malformed or out-of-range request field; detected before any fetch
    #[error("invalid '{field}': {message}")]
    Validation { field: String, message: String },

    /// An input collection is empty; detected after fetch, before allocation
    #[error("no {0} found")]
    MissingData(Collection),

    /// Writing final hours failed for a driver
    #[error("failed to persist hours for driver {driver_id}: {message} (rolled back: {rolled_back})")]
    Persistence {
        driver_id: String,
        message: String,
        /// Every hour total already written was restored to its starting value
        rolled_back: bool,
    },

    /// Driver hours changed in the store while the run was computing
    #[error("driver roster changed during the run (expected fingerprint {expected}, found {found})")]
    RosterConflict { expected: String, found: String },

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Response class of an error, in HTTP terms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorClass {
    BadRequest,
    NotFound,
    Internal,
}

impl ErrorClass {
    pub fn status_code(&self) -> u16 {
        match self {
            ErrorClass::BadRequest => 400,
            ErrorClass::NotFound => 404,
            ErrorClass::Internal => 500,
        }
    }
}

impl SimulationError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        SimulationError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn class(&self) -> ErrorClass {
        match self {
            SimulationError::Validation { .. } => ErrorClass::BadRequest,
            SimulationError::MissingData(_) => ErrorClass::NotFound,
            SimulationError::Persistence { .. }
            | SimulationError::RosterConflict { .. }
            | SimulationError::Store(_) => ErrorClass::Internal,
        }
    }

    /// Offending request field, for validation errors
    pub fn field(&self) -> Option<&str> {
        match self {
            SimulationError::Validation { field, .. } => Some(field),
            _ => None,
        }
    }

    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            error: self.to_string(),
            class: self.class(),
            field: self.field().map(str::to_string),
        }
    }
}

/// Serializable error body for response boundaries
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub class: ErrorClass,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classes() {
        assert_eq!(
            SimulationError::validation("drivers", "must be positive").class(),
            ErrorClass::BadRequest
        );
        assert_eq!(
            SimulationError::MissingData(Collection::Routes).class().status_code(),
            404
        );
        let persistence = SimulationError::Persistence {
            driver_id: "D1".to_string(),
            message: "disk full".to_string(),
            rolled_back: true,
        };
        assert_eq!(persistence.class().status_code(), 500);
    }

    #[test]
    fn test_missing_data_message_names_collection() {
        assert_eq!(SimulationError::MissingData(Collection::Orders).to_string(), "no orders found");
    }

    #[test]
    fn test_response_carries_field() {
        let response = SimulationError::validation("maxHours", "out of range").to_response();
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["class"], "bad_request");
        assert_eq!(json["field"], "maxHours");

        let response = SimulationError::MissingData(Collection::Drivers).to_response();
        let json = serde_json::to_value(&response).unwrap();
        assert!(json.get("field").is_none());
    }
}
