//! Delivery time estimation
//!
//! The estimate is the route's base time, stretched by the fatigue
//! multiplier when the driver already has more than the fatigue threshold
//! of cumulative hours before taking the order. An observed delivery
//! replaces the estimate outright and is never stretched.

use crate::models::{Order, Route};
use crate::rules::SimulationRules;

/// Effective duration of one delivery
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeliveryEstimate {
    /// Duration in minutes
    pub minutes: f64,

    /// Fatigue multiplier was applied
    pub fatigued: bool,

    /// Duration comes from an observed delivery timestamp
    pub observed: bool,
}

/// Estimate how long `order` takes on `route` for a driver with
/// `hours_before` cumulative hours.
///
/// # Example
/// ```
/// use chrono::Utc;
/// use delivery_simulator_core_rs::estimation::estimate_delivery;
/// use delivery_simulator_core_rs::{Order, Route, SimulationRules, TrafficLevel};
///
/// let order = Order::new("O1", 800.0, "R1", Utc::now());
/// let route = Route::new("R1", 10.0, TrafficLevel::Low, 30.0);
/// let rules = SimulationRules::default();
///
/// assert_eq!(estimate_delivery(&order, &route, 8.0, &rules).minutes, 30.0);
/// assert_eq!(estimate_delivery(&order, &route, 8.5, &rules).minutes, 39.0);
/// ```
pub fn estimate_delivery(
    order: &Order,
    route: &Route,
    hours_before: f64,
    rules: &SimulationRules,
) -> DeliveryEstimate {
    if let Some(minutes) = order.observed_minutes() {
        return DeliveryEstimate {
            minutes,
            fatigued: false,
            observed: true,
        };
    }

    let fatigued = hours_before > rules.fatigue_threshold_hours;
    let minutes = if fatigued {
        route.base_time_min * rules.fatigue_multiplier
    } else {
        route.base_time_min
    };

    DeliveryEstimate {
        minutes,
        fatigued,
        observed: false,
    }
}
