//! Orchestrator Engine
//!
//! Runs one simulation end to end:
//!
//! ```text
//! 1. Validate request parameters (before any I/O)
//! 2. Fetch orders, routes and drivers; abort if any collection is empty
//! 3. Snapshot the roster (fingerprint for the conflict check)
//! 4. Build the route index
//! 5. Allocate orders in batch order; for each placement:
//!      estimate duration -> economics -> aggregate -> add driver hours
//! 6. Package KPIs (rounded once, here)
//! 7. Re-check the roster fingerprint, then persist final driver hours
//! ```
//!
//! Steps 4-6 are the pure [`simulate`] function; the [`Simulator`] wraps it
//! with the record store and serialises runs that share that store.
//!
//! # Example
//!
//! ```rust
//! use chrono::Utc;
//! use delivery_simulator_core_rs::store::InMemoryStore;
//! use delivery_simulator_core_rs::{Driver, Order, Route, SimulationRequest, Simulator, TrafficLevel};
//!
//! let now = Utc::now();
//! let store = InMemoryStore::from_models(
//!     &[Order::new("O1", 500.0, "R1", now), Order::new("O2", 500.0, "R1", now)],
//!     &[Driver::new("D1", "Asha", 0.0), Driver::new("D2", "Ravi", 0.0), Driver::new("D3", "Meena", 0.0)],
//!     &[Route::new("R1", 10.0, TrafficLevel::Low, 30.0)],
//! );
//!
//! let simulator = Simulator::new(store);
//! let report = simulator.run(&SimulationRequest::new(3, "09:00", 8.0)).unwrap();
//!
//! assert_eq!(report.result.total_profit, 900.0);
//! assert_eq!(report.result.efficiency_score, 100.0);
//! assert_eq!(report.result.fuel_costs.low, 100.0);
//! ```

use crate::aggregation::{KpiAccumulator, RunTotals, SimulationResult};
use crate::allocation::{allocate, AllocationState, Assignment};
use crate::core::StartTime;
use crate::economics::order_economics;
use crate::estimation::estimate_delivery;
use crate::models::{Driver, Event, EventLog, Order, Route};
use crate::orchestrator::persistence::{persist_driver_hours, DriverHours};
use crate::orchestrator::request::{RunParameters, SimulationRequest};
use crate::orchestrator::snapshot::RosterSnapshot;
use crate::orchestrator::{Collection, SimulationError};
use crate::routing::RouteIndex;
use crate::rules::SimulationRules;
use crate::store::RecordStore;
use parking_lot::Mutex;
use tracing::{debug, info, warn};
use uuid::Uuid;

// ============================================================================
// Pure computation
// ============================================================================

/// Everything a run computes before persistence
#[derive(Debug, Clone, PartialEq)]
pub struct RunComputation {
    pub result: SimulationResult,

    /// Placements, in batch order
    pub assignments: Vec<Assignment>,

    /// Orders never placed because no driver had capacity left
    pub unassigned: Vec<String>,

    /// Placed orders whose route did not resolve
    pub unrouted: Vec<String>,

    /// Starting and final hours of each driver used, in roster order
    pub driver_hours: Vec<DriverHours>,

    pub events: EventLog,
}

/// Simulate a batch of orders against the first `usable_drivers` drivers.
///
/// Performs no I/O. `usable_drivers` is clamped to the roster size.
pub fn simulate(
    orders: &[Order],
    drivers: &[Driver],
    routes: &[Route],
    usable_drivers: usize,
    max_hours: f64,
    rules: &SimulationRules,
) -> RunComputation {
    let roster = &drivers[..usable_drivers.min(drivers.len())];
    let index = RouteIndex::new(routes.iter().cloned());

    let mut kpis = KpiAccumulator::new();
    let mut events = EventLog::new();
    let mut unrouted = Vec::new();

    let state = AllocationState::new(roster.iter().map(Driver::current_shift_hours).collect());
    let (outcome, state) = allocate(state, orders, max_hours, |order, assignment| {
        let driver_id = roster[assignment.driver].id();
        events.log(Event::OrderAssigned {
            sequence: assignment.sequence,
            order_id: order.id().to_string(),
            driver_id: driver_id.to_string(),
            hours_before: assignment.hours_before,
        });

        let Some(route) = index.get(order.route_id()) else {
            warn!(order_id = order.id(), route_id = order.route_id(), "route not found, order excluded from economics");
            events.log(Event::RouteUnresolved {
                sequence: assignment.sequence,
                order_id: order.id().to_string(),
                route_id: order.route_id().to_string(),
            });
            kpis.add_unrouted();
            unrouted.push(order.id().to_string());
            return None;
        };

        let estimate = estimate_delivery(order, route, assignment.hours_before, rules);
        let economics = order_economics(order.value(), route, estimate.minutes, rules);
        kpis.add(&economics, route.traffic);

        debug!(
            order_id = order.id(),
            driver_id,
            minutes = estimate.minutes,
            fatigued = estimate.fatigued,
            on_time = economics.on_time,
            profit = economics.profit,
            "order delivered"
        );
        events.log(Event::DeliveryCompleted {
            sequence: assignment.sequence,
            order_id: order.id().to_string(),
            driver_id: driver_id.to_string(),
            minutes: estimate.minutes,
            fatigued: estimate.fatigued,
            observed: estimate.observed,
            on_time: economics.on_time,
            profit: economics.profit,
        });

        Some(estimate.minutes)
    });

    if let Some(first) = outcome.unassigned.first() {
        let remaining = outcome.unassigned.len();
        warn!(order_id = %first, remaining, "no driver under the hour cap, allocation stopped");
        events.log(Event::AllocationExhausted {
            sequence: orders.len() - remaining,
            order_id: first.clone(),
            remaining,
        });
    }

    let driver_hours = roster
        .iter()
        .zip(state.hours())
        .map(|(driver, &final_hours)| DriverHours {
            driver_id: driver.id().to_string(),
            starting_hours: driver.current_shift_hours(),
            final_hours,
        })
        .collect();

    let totals = RunTotals::new(orders, roster.len(), index.source_len());

    RunComputation {
        result: kpis.finish(totals),
        assignments: outcome.assignments,
        unassigned: outcome.unassigned,
        unrouted,
        driver_hours,
        events,
    }
}

// ============================================================================
// Simulator
// ============================================================================

/// Outcome of a simulation run
#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    pub run_id: Uuid,
    pub start_time: StartTime,
    pub max_hours: f64,

    /// KPIs in response shape
    pub result: SimulationResult,

    pub assignments: Vec<Assignment>,
    pub unassigned: Vec<String>,
    pub unrouted: Vec<String>,
    pub driver_hours: Vec<DriverHours>,
    pub events: EventLog,

    /// Final hours were written to the store
    pub persisted: bool,
}

/// Runs simulations against a record store
///
/// Runs on the same simulator never overlap: each holds the run lock from
/// fetch to the last write. Changes made to the store by anyone else while
/// a run computes are caught by the roster fingerprint check.
pub struct Simulator<S> {
    store: S,
    rules: SimulationRules,
    run_lock: Mutex<()>,
}

impl<S: RecordStore> Simulator<S> {
    /// Simulator with the default rules
    pub fn new(store: S) -> Self {
        Self {
            store,
            rules: SimulationRules::default(),
            run_lock: Mutex::new(()),
        }
    }

    /// Simulator with a custom rule set
    pub fn with_rules(store: S, rules: SimulationRules) -> Result<Self, SimulationError> {
        rules.validate()?;
        Ok(Self {
            store,
            rules,
            run_lock: Mutex::new(()),
        })
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn rules(&self) -> &SimulationRules {
        &self.rules
    }

    /// Run a simulation and persist the final driver hours
    pub fn run(&self, request: &SimulationRequest) -> Result<RunReport, SimulationError> {
        self.execute(request, true)
    }

    /// Run a simulation without writing anything back
    pub fn preview(&self, request: &SimulationRequest) -> Result<RunReport, SimulationError> {
        self.execute(request, false)
    }

    fn execute(&self, request: &SimulationRequest, persist: bool) -> Result<RunReport, SimulationError> {
        let params = request.validate()?;
        let _guard = self.run_lock.lock();
        let run_id = Uuid::new_v4();

        let (orders, drivers, routes) = self.fetch()?;
        let snapshot = RosterSnapshot::capture(&drivers);
        let usable = params.drivers.min(drivers.len());

        info!(
            %run_id,
            orders = orders.len(),
            drivers = usable,
            routes = routes.len(),
            max_hours = params.max_hours,
            start_time = %params.start_time,
            "simulation started"
        );

        let mut computation = simulate(&orders, &drivers, &routes, usable, params.max_hours, &self.rules);

        if persist {
            self.check_roster(&snapshot)?;
            persist_driver_hours(&self.store, &computation.driver_hours, &mut computation.events)?;
        }

        info!(
            %run_id,
            total_profit = computation.result.total_profit,
            efficiency_score = computation.result.efficiency_score,
            on_time = computation.result.on_time_deliveries,
            late = computation.result.late_deliveries,
            unassigned = computation.unassigned.len(),
            persisted = persist,
            "simulation finished"
        );

        Ok(report(run_id, params, computation, persist))
    }

    /// Fetch every collection, failing on the first empty one
    fn fetch(&self) -> Result<(Vec<Order>, Vec<Driver>, Vec<Route>), SimulationError> {
        let orders = self.store.fetch_orders()?;
        let routes = self.store.fetch_routes()?;
        let drivers = self.store.fetch_drivers()?;

        if orders.is_empty() {
            return Err(SimulationError::MissingData(Collection::Orders));
        }
        if routes.is_empty() {
            return Err(SimulationError::MissingData(Collection::Routes));
        }
        if drivers.is_empty() {
            return Err(SimulationError::MissingData(Collection::Drivers));
        }
        Ok((orders, drivers, routes))
    }

    fn check_roster(&self, snapshot: &RosterSnapshot) -> Result<(), SimulationError> {
        let current = RosterSnapshot::capture(&self.store.fetch_drivers()?);
        if !snapshot.matches(&current) {
            warn!(expected = %snapshot.fingerprint, found = %current.fingerprint, "driver roster changed during run");
            return Err(SimulationError::RosterConflict {
                expected: snapshot.fingerprint.clone(),
                found: current.fingerprint,
            });
        }
        Ok(())
    }
}

fn report(run_id: Uuid, params: RunParameters, computation: RunComputation, persisted: bool) -> RunReport {
    RunReport {
        run_id,
        start_time: params.start_time,
        max_hours: params.max_hours,
        result: computation.result,
        assignments: computation.assignments,
        unassigned: computation.unassigned,
        unrouted: computation.unrouted,
        driver_hours: computation.driver_hours,
        events: computation.events,
        persisted,
    }
}
