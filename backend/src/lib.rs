//! Delivery Simulator Core - Rust Engine
//!
//! Simulates one pass of a delivery fleet: orders are allocated to drivers
//! under a per-driver hour cap, each delivery's duration and economics are
//! computed, fleet KPIs are aggregated, and drivers' cumulative hours are
//! written back.
//!
//! # Architecture
//!
//! - **core**: Output rounding and start-time parsing
//! - **models**: Domain types (Order, Driver, Route, Event)
//! - **rules**: Fatigue, lateness, bonus and fuel constants
//! - **routing**: Per-run route index
//! - **allocation**: Rotating-cursor allocator with explicit state
//! - **estimation**: Delivery duration with fatigue or observed time
//! - **economics**: Penalty, bonus, fuel cost and profit per order
//! - **aggregation**: Fleet KPIs
//! - **store**: Record store trait, record conversion, in-memory and JSON stores
//! - **orchestrator**: Request validation, run sequence, persistence
//!
//! # Critical Invariants
//!
//! 1. Order sequence through the allocator is preserved; results are deterministic
//! 2. Driver hours never decrease within a run
//! 3. Money is rounded to two decimals only at output

// Module declarations
pub mod aggregation;
pub mod allocation;
pub mod core;
pub mod economics;
pub mod estimation;
pub mod models;
pub mod orchestrator;
pub mod routing;
pub mod rules;
pub mod store;

// Re-exports for convenience
pub use aggregation::SimulationResult;
pub use economics::FuelCosts;
pub use models::{Driver, Event, EventLog, Order, Route, TrafficLevel};
pub use orchestrator::{
    simulate, Collection, ErrorClass, ErrorResponse, RunReport, SimulationError, SimulationRequest,
    Simulator,
};
pub use routing::RouteIndex;
pub use rules::SimulationRules;
pub use store::{InMemoryStore, JsonFileStore, RecordStore, StoreError};

// FFI module (when feature enabled)
#[cfg(feature = "pyo3")]
pub mod ffi;

// PyO3 exports (when feature enabled)
#[cfg(feature = "pyo3")]
use pyo3::prelude::*;

#[cfg(feature = "pyo3")]
#[pymodule]
fn delivery_simulator_core_rs(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<ffi::simulator::PySimulator>()?;
    Ok(())
}
