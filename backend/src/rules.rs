//! Simulation rules
//!
//! Constants that drive delivery estimation and per-order economics. The
//! defaults are the company's operating rules; a different rule set can be
//! supplied per simulator (the CLI reads one from a JSON file).
//!
//! Monetary values are rupees, durations are minutes unless named otherwise.

use crate::orchestrator::SimulationError;
use serde::{Deserialize, Serialize};

/// Delivery and cost rules applied to every order of a run
///
/// # Example
/// ```
/// use delivery_simulator_core_rs::SimulationRules;
///
/// let rules: SimulationRules = serde_json::from_str(r#"{"late_penalty": 75.0}"#).unwrap();
/// assert_eq!(rules.late_penalty, 75.0);
/// assert_eq!(rules.grace_minutes, 10.0); // everything else keeps its default
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationRules {
    /// Drivers with more cumulative hours than this are fatigued
    pub fatigue_threshold_hours: f64,

    /// Factor applied to a route's base time for a fatigued driver
    pub fatigue_multiplier: f64,

    /// Minutes over base time still counted as on time
    pub grace_minutes: f64,

    /// Flat penalty for a late delivery
    pub late_penalty: f64,

    /// Orders strictly above this value earn a bonus when on time
    pub high_value_threshold: f64,

    /// Bonus as a fraction of order value
    pub high_value_bonus_rate: f64,

    /// Fuel cost per kilometre on every route
    pub fuel_cost_per_km: f64,

    /// Extra fuel cost per kilometre on High traffic routes
    pub high_traffic_surcharge_per_km: f64,
}

impl Default for SimulationRules {
    fn default() -> Self {
        Self {
            fatigue_threshold_hours: 8.0,
            fatigue_multiplier: 1.3,
            grace_minutes: 10.0,
            late_penalty: 50.0,
            high_value_threshold: 1000.0,
            high_value_bonus_rate: 0.1,
            fuel_cost_per_km: 5.0,
            high_traffic_surcharge_per_km: 2.0,
        }
    }
}

impl SimulationRules {
    /// Reject rule sets that would make the economics meaningless
    pub fn validate(&self) -> Result<(), SimulationError> {
        let fields = [
            ("fatigue_threshold_hours", self.fatigue_threshold_hours),
            ("fatigue_multiplier", self.fatigue_multiplier),
            ("grace_minutes", self.grace_minutes),
            ("late_penalty", self.late_penalty),
            ("high_value_threshold", self.high_value_threshold),
            ("high_value_bonus_rate", self.high_value_bonus_rate),
            ("fuel_cost_per_km", self.fuel_cost_per_km),
            ("high_traffic_surcharge_per_km", self.high_traffic_surcharge_per_km),
        ];
        for (name, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(SimulationError::validation(
                    format!("rules.{name}"),
                    format!("must be a finite, non-negative number, got {value}"),
                ));
            }
        }
        if self.fatigue_multiplier < 1.0 {
            return Err(SimulationError::validation(
                "rules.fatigue_multiplier",
                "must be at least 1.0",
            ));
        }
        Ok(())
    }
}
