//! Fleet-wide KPI aggregation
//!
//! Accumulates economics over the placed orders of a run and derives the
//! reported KPIs. Two ratios deliberately use the full fetched batch rather
//! than the placed orders:
//!
//! - `efficiency_score = on_time / total_orders * 100`, so orders left
//!   unassigned when drivers run out of hours lower the score
//! - `average_order_value` is the mean over every fetched order
//!
//! All values are rounded to two decimals in [`KpiAccumulator::finish`] and
//! nowhere else.

use crate::core::money::{mean, round2};
use crate::economics::{FuelCosts, OrderEconomics};
use crate::models::{Order, TrafficLevel};
use serde::{Deserialize, Serialize};

/// Running totals for a run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KpiAccumulator {
    /// Sum of per-order profit (unrounded)
    pub total_profit: f64,

    pub on_time: usize,

    pub late: usize,

    /// Placed orders whose route did not resolve
    pub unrouted: usize,

    /// Fuel cost per traffic tier (unrounded)
    pub fuel_costs: FuelCosts,
}

/// Batch-level counts the KPIs are normalised against
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunTotals {
    /// Every fetched order, placed or not
    pub orders: usize,

    /// Drivers actually used
    pub drivers: usize,

    /// Fetched routes
    pub routes: usize,

    /// Mean value of every fetched order
    pub average_order_value: f64,
}

impl RunTotals {
    pub fn new(orders: &[Order], drivers: usize, routes: usize) -> Self {
        Self {
            orders: orders.len(),
            drivers,
            routes,
            average_order_value: mean(orders.iter().map(Order::value)),
        }
    }
}

impl KpiAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one delivery on a route of the given traffic tier
    pub fn add(&mut self, economics: &OrderEconomics, traffic: TrafficLevel) {
        self.total_profit += economics.profit;
        if economics.on_time {
            self.on_time += 1;
        } else {
            self.late += 1;
        }
        self.fuel_costs.add(traffic, economics.fuel_cost);
    }

    /// Count a placed order that was excluded from economics
    pub fn add_unrouted(&mut self) {
        self.unrouted += 1;
    }

    /// Placed orders seen so far
    pub fn placed(&self) -> usize {
        self.on_time + self.late + self.unrouted
    }

    /// Round and package the KPIs
    pub fn finish(&self, totals: RunTotals) -> SimulationResult {
        let efficiency = if totals.orders == 0 {
            0.0
        } else {
            self.on_time as f64 / totals.orders as f64 * 100.0
        };

        SimulationResult {
            total_profit: round2(self.total_profit),
            efficiency_score: round2(efficiency),
            on_time_deliveries: self.on_time,
            late_deliveries: self.late,
            fuel_costs: self.fuel_costs.map(round2),
            total_orders: totals.orders,
            total_drivers: totals.drivers,
            total_routes: totals.routes,
            average_order_value: round2(totals.average_order_value),
        }
    }
}

/// KPIs of one simulation run, in response shape
///
/// # Example
/// ```
/// use delivery_simulator_core_rs::aggregation::{KpiAccumulator, RunTotals};
///
/// let totals = RunTotals { orders: 3, drivers: 2, routes: 1, average_order_value: 500.0 };
/// let result = KpiAccumulator::new().finish(totals);
///
/// let json = serde_json::to_value(&result).unwrap();
/// assert_eq!(json["totalOrders"], 3);
/// assert_eq!(json["fuelCosts"]["Low"], 0.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationResult {
    pub total_profit: f64,
    pub efficiency_score: f64,
    pub on_time_deliveries: usize,
    pub late_deliveries: usize,
    pub fuel_costs: FuelCosts,
    pub total_orders: usize,
    pub total_drivers: usize,
    pub total_routes: usize,
    pub average_order_value: f64,
}
