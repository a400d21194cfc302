//! Domain models for the delivery simulator

pub mod driver;
pub mod event;
pub mod order;
pub mod route;

// Re-exports
pub use driver::Driver;
pub use event::{Event, EventLog};
pub use order::Order;
pub use route::{Route, TrafficLevel, UnknownTrafficLevel};
