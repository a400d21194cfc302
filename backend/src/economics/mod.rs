//! Per-order economics
//!
//! Applied in order for each placed order whose route resolved:
//!
//! ```text
//! 1. on_time  = minutes <= base_time + grace          penalty = late_penalty if late
//! 2. bonus    = value * bonus_rate if value > threshold and on_time
//! 3. fuel     = km * fuel_per_km (+ km * surcharge on High traffic)
//! 4. profit   = value + bonus - penalty - fuel
//! ```
//!
//! Values are left unrounded; rounding happens once, in aggregation.

use crate::models::{Route, TrafficLevel};
use crate::rules::SimulationRules;
use serde::{Deserialize, Serialize};

/// Economics of a single delivery
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrderEconomics {
    pub penalty: f64,
    pub bonus: f64,
    pub fuel_cost: f64,
    pub profit: f64,
    pub on_time: bool,
}

/// Compute penalty, bonus, fuel cost and profit for one delivery.
///
/// # Example
/// ```
/// use delivery_simulator_core_rs::economics::order_economics;
/// use delivery_simulator_core_rs::{Route, SimulationRules, TrafficLevel};
///
/// let route = Route::new("R1", 20.0, TrafficLevel::Low, 40.0);
/// let econ = order_economics(1500.0, &route, 35.0, &SimulationRules::default());
///
/// assert!(econ.on_time);
/// assert_eq!(econ.bonus, 150.0);
/// assert_eq!(econ.fuel_cost, 100.0);
/// assert_eq!(econ.profit, 1550.0);
/// ```
pub fn order_economics(
    order_value: f64,
    route: &Route,
    minutes: f64,
    rules: &SimulationRules,
) -> OrderEconomics {
    let on_time = minutes <= route.base_time_min + rules.grace_minutes;
    let penalty = if on_time { 0.0 } else { rules.late_penalty };

    let bonus = if order_value > rules.high_value_threshold && on_time {
        order_value * rules.high_value_bonus_rate
    } else {
        0.0
    };

    let fuel_cost = fuel_cost(route, rules);
    let profit = order_value + bonus - penalty - fuel_cost;

    OrderEconomics {
        penalty,
        bonus,
        fuel_cost,
        profit,
        on_time,
    }
}

/// Fuel cost of driving a route once
pub fn fuel_cost(route: &Route, rules: &SimulationRules) -> f64 {
    let mut cost = route.distance_km * rules.fuel_cost_per_km;
    if route.traffic == TrafficLevel::High {
        cost += route.distance_km * rules.high_traffic_surcharge_per_km;
    }
    cost
}

/// Fuel cost totals bucketed by traffic tier
///
/// Serializes as `{"Low": .., "Medium": .., "High": ..}`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FuelCosts {
    #[serde(rename = "Low")]
    pub low: f64,
    #[serde(rename = "Medium")]
    pub medium: f64,
    #[serde(rename = "High")]
    pub high: f64,
}

impl FuelCosts {
    pub fn add(&mut self, traffic: TrafficLevel, amount: f64) {
        *self.bucket_mut(traffic) += amount;
    }

    pub fn get(&self, traffic: TrafficLevel) -> f64 {
        match traffic {
            TrafficLevel::Low => self.low,
            TrafficLevel::Medium => self.medium,
            TrafficLevel::High => self.high,
        }
    }

    pub fn total(&self) -> f64 {
        self.low + self.medium + self.high
    }

    /// Apply `f` to every bucket
    pub fn map(self, f: impl Fn(f64) -> f64) -> Self {
        Self {
            low: f(self.low),
            medium: f(self.medium),
            high: f(self.high),
        }
    }

    fn bucket_mut(&mut self, traffic: TrafficLevel) -> &mut f64 {
        match traffic {
            TrafficLevel::Low => &mut self.low,
            TrafficLevel::Medium => &mut self.medium,
            TrafficLevel::High => &mut self.high,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules() -> SimulationRules {
        SimulationRules::default()
    }

    #[test]
    fn test_grace_window_boundary_is_on_time() {
        let route = Route::new("R1", 10.0, TrafficLevel::Low, 30.0);
        let econ = order_economics(500.0, &route, 40.0, &rules());
        assert!(econ.on_time);
        assert_eq!(econ.penalty, 0.0);
    }

    #[test]
    fn test_late_delivery_pays_penalty_and_loses_bonus() {
        let route = Route::new("R1", 10.0, TrafficLevel::Low, 30.0);
        let econ = order_economics(2000.0, &route, 40.5, &rules());
        assert!(!econ.on_time);
        assert_eq!(econ.penalty, 50.0);
        assert_eq!(econ.bonus, 0.0);
        assert_eq!(econ.profit, 2000.0 - 50.0 - 50.0);
    }

    #[test]
    fn test_bonus_threshold_is_exclusive() {
        let route = Route::new("R1", 1.0, TrafficLevel::Low, 30.0);
        assert_eq!(order_economics(1000.0, &route, 30.0, &rules()).bonus, 0.0);
        assert!(order_economics(1000.5, &route, 30.0, &rules()).bonus > 100.0);
        assert_eq!(order_economics(2000.0, &route, 30.0, &rules()).bonus, 200.0);
    }

    #[test]
    fn test_high_traffic_surcharge() {
        let high = Route::new("R1", 10.0, TrafficLevel::High, 30.0);
        let medium = Route::new("R2", 10.0, TrafficLevel::Medium, 30.0);
        assert_eq!(fuel_cost(&high, &rules()), 70.0);
        assert_eq!(fuel_cost(&medium, &rules()), 50.0);
    }

    #[test]
    fn test_fuel_costs_buckets() {
        let mut costs = FuelCosts::default();
        costs.add(TrafficLevel::Low, 50.0);
        costs.add(TrafficLevel::High, 70.0);
        costs.add(TrafficLevel::Low, 25.0);
        assert_eq!(costs.get(TrafficLevel::Low), 75.0);
        assert_eq!(costs.get(TrafficLevel::Medium), 0.0);
        assert_eq!(costs.total(), 145.0);

        let json = serde_json::to_value(costs).unwrap();
        assert_eq!(json["High"], 70.0);
    }
}
