//! Orchestrator - runs a simulation against a record store
//!
//! See `engine.rs` for the run sequence.

pub mod engine;
pub mod error;
pub mod persistence;
pub mod request;
pub mod snapshot;

#[cfg(test)]
mod tests;

// Re-export main types for convenience
pub use engine::{simulate, RunComputation, RunReport, Simulator};
pub use error::{Collection, ErrorClass, ErrorResponse, SimulationError};
pub use persistence::DriverHours;
pub use request::{RunParameters, SimulationRequest};
pub use snapshot::{DriverSnapshot, RosterSnapshot};
