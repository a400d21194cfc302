//! Route model
//!
//! Routes are immutable for the duration of a run.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Traffic tier of a route
///
/// Governs the fuel surcharge and which fuel-cost bucket a delivery falls in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TrafficLevel {
    Low,
    Medium,
    High,
}

impl TrafficLevel {
    pub const ALL: [TrafficLevel; 3] = [TrafficLevel::Low, TrafficLevel::Medium, TrafficLevel::High];

    pub fn as_str(&self) -> &'static str {
        match self {
            TrafficLevel::Low => "Low",
            TrafficLevel::Medium => "Medium",
            TrafficLevel::High => "High",
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown traffic level '{0}', expected Low, Medium or High")]
pub struct UnknownTrafficLevel(pub String);

impl FromStr for TrafficLevel {
    type Err = UnknownTrafficLevel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Low" => Ok(TrafficLevel::Low),
            "Medium" => Ok(TrafficLevel::Medium),
            "High" => Ok(TrafficLevel::High),
            other => Err(UnknownTrafficLevel(other.to_string())),
        }
    }
}

impl fmt::Display for TrafficLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A delivery route
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    /// Unique route identifier
    pub id: String,

    /// Route length in kilometres
    pub distance_km: f64,

    /// Traffic tier
    pub traffic: TrafficLevel,

    /// Expected delivery time in minutes under normal conditions
    pub base_time_min: f64,
}

impl Route {
    pub fn new(id: impl Into<String>, distance_km: f64, traffic: TrafficLevel, base_time_min: f64) -> Self {
        Self {
            id: id.into(),
            distance_km,
            traffic,
            base_time_min,
        }
    }
}
