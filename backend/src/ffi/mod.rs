//! Python bindings (PyO3)
//!
//! Exposes a `Simulator` class backed by an in-memory store:
//!
//! ```python
//! from delivery_simulator_core_rs import Simulator
//!
//! sim = Simulator(
//!     orders=[{"orderId": "O1", "valueRs": 500, "route": "R1", "createdAt": "2025-01-06T09:00:00Z"}],
//!     drivers=[{"id": "D1", "name": "Asha", "currentShiftHours": 0}],
//!     routes=[{"routeId": "R1", "distanceKm": 10, "trafficLevel": "Low", "baseTimeMin": 30}],
//! )
//! result = sim.run({"drivers": 1, "startTime": "09:00", "maxHours": 8})
//! print(result["totalProfit"], sim.driver_hours())
//! ```

pub mod simulator;
pub mod types;
