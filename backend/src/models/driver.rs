//! Driver model
//!
//! A driver carries a cumulative shift-hours counter. Within a run the
//! counter only grows; the stored value changes once, at the end of a run.

use serde::{Deserialize, Serialize};

/// A fleet driver
///
/// # Example
/// ```
/// use delivery_simulator_core_rs::Driver;
///
/// let driver = Driver::new("D1", "Asha", 6.5).with_past_week_hours(vec![8.0, 7.5]);
/// assert_eq!(driver.current_shift_hours(), 6.5);
/// assert_eq!(driver.past_week_hours().len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Driver {
    /// Record identifier used for write-back
    id: String,

    /// Display name
    name: String,

    /// Cumulative shift hours (never negative)
    current_shift_hours: f64,

    /// Hours worked on each of the past days; informational only
    past_week_hours: Vec<f64>,
}

impl Driver {
    pub fn new(id: impl Into<String>, name: impl Into<String>, current_shift_hours: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            current_shift_hours,
            past_week_hours: Vec::new(),
        }
    }

    pub fn with_past_week_hours(mut self, hours: Vec<f64>) -> Self {
        self.past_week_hours = hours;
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn current_shift_hours(&self) -> f64 {
        self.current_shift_hours
    }

    pub fn past_week_hours(&self) -> &[f64] {
        &self.past_week_hours
    }
}
