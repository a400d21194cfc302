//! Event logging for run auditing.
//!
//! Every significant step of a simulation run is captured as an [`Event`],
//! in the order it happened. The log is returned with the run report so
//! callers (and tests) can see why an order ended up where it did.
//!
//! # Event Types
//!
//! - **Allocation**: order placed on a driver, or allocation exhausted
//! - **Delivery**: estimated duration and economics of a placed order
//! - **Routing**: order whose route could not be resolved
//! - **Persistence**: driver hours written back or restored after a failure
//!
//! # Example
//!
//! ```rust
//! use delivery_simulator_core_rs::models::{Event, EventLog};
//!
//! let mut log = EventLog::new();
//! log.log(Event::OrderAssigned {
//!     sequence: 0,
//!     order_id: "ORD-1".to_string(),
//!     driver_id: "D1".to_string(),
//!     hours_before: 0.0,
//! });
//!
//! assert_eq!(log.events_for_order("ORD-1").len(), 1);
//! ```

/// Run event capturing a state change.
///
/// `sequence` is the position of the order in the fetched batch, which is
/// the only ordering that matters within a run.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Allocator placed an order on a driver
    OrderAssigned {
        sequence: usize,
        order_id: String,
        driver_id: String,
        hours_before: f64,
    },

    /// Duration and economics computed for a placed order
    DeliveryCompleted {
        sequence: usize,
        order_id: String,
        driver_id: String,
        minutes: f64,
        fatigued: bool,
        observed: bool,
        on_time: bool,
        profit: f64,
    },

    /// Order placed but its route is not in the route index
    RouteUnresolved {
        sequence: usize,
        order_id: String,
        route_id: String,
    },

    /// No driver had capacity; this order and every later one stay unassigned
    AllocationExhausted {
        sequence: usize,
        order_id: String,
        remaining: usize,
    },

    /// Final hours written back for a driver
    DriverHoursPersisted {
        sequence: usize,
        driver_id: String,
        hours: f64,
    },

    /// Driver hours restored to their starting value after a failed write
    DriverHoursRestored {
        sequence: usize,
        driver_id: String,
        hours: f64,
    },
}

impl Event {
    pub fn sequence(&self) -> usize {
        match self {
            Event::OrderAssigned { sequence, .. } => *sequence,
            Event::DeliveryCompleted { sequence, .. } => *sequence,
            Event::RouteUnresolved { sequence, .. } => *sequence,
            Event::AllocationExhausted { sequence, .. } => *sequence,
            Event::DriverHoursPersisted { sequence, .. } => *sequence,
            Event::DriverHoursRestored { sequence, .. } => *sequence,
        }
    }

    pub fn event_type(&self) -> &'static str {
        match self {
            Event::OrderAssigned { .. } => "OrderAssigned",
            Event::DeliveryCompleted { .. } => "DeliveryCompleted",
            Event::RouteUnresolved { .. } => "RouteUnresolved",
            Event::AllocationExhausted { .. } => "AllocationExhausted",
            Event::DriverHoursPersisted { .. } => "DriverHoursPersisted",
            Event::DriverHoursRestored { .. } => "DriverHoursRestored",
        }
    }

    pub fn order_id(&self) -> Option<&str> {
        match self {
            Event::OrderAssigned { order_id, .. }
            | Event::DeliveryCompleted { order_id, .. }
            | Event::RouteUnresolved { order_id, .. }
            | Event::AllocationExhausted { order_id, .. } => Some(order_id),
            Event::DriverHoursPersisted { .. } | Event::DriverHoursRestored { .. } => None,
        }
    }

    pub fn driver_id(&self) -> Option<&str> {
        match self {
            Event::OrderAssigned { driver_id, .. }
            | Event::DeliveryCompleted { driver_id, .. }
            | Event::DriverHoursPersisted { driver_id, .. }
            | Event::DriverHoursRestored { driver_id, .. } => Some(driver_id),
            Event::RouteUnresolved { .. } | Event::AllocationExhausted { .. } => None,
        }
    }
}

/// Ordered log of run events
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventLog {
    events: Vec<Event>,
}

impl EventLog {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn log(&mut self, event: Event) {
        self.events.push(event);
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn events_of_type(&self, event_type: &str) -> Vec<&Event> {
        self.events
            .iter()
            .filter(|e| e.event_type() == event_type)
            .collect()
    }

    pub fn events_for_order(&self, order_id: &str) -> Vec<&Event> {
        self.events
            .iter()
            .filter(|e| e.order_id() == Some(order_id))
            .collect()
    }

    pub fn events_for_driver(&self, driver_id: &str) -> Vec<&Event> {
        self.events
            .iter()
            .filter(|e| e.driver_id() == Some(driver_id))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assigned(sequence: usize, order: &str, driver: &str) -> Event {
        Event::OrderAssigned {
            sequence,
            order_id: order.to_string(),
            driver_id: driver.to_string(),
            hours_before: 0.0,
        }
    }

    #[test]
    fn test_filters() {
        let mut log = EventLog::new();
        log.log(assigned(0, "O1", "D1"));
        log.log(assigned(1, "O2", "D2"));
        log.log(Event::AllocationExhausted {
            sequence: 2,
            order_id: "O3".to_string(),
            remaining: 1,
        });
        log.log(Event::DriverHoursPersisted {
            sequence: 0,
            driver_id: "D1".to_string(),
            hours: 0.5,
        });

        assert_eq!(log.len(), 4);
        assert_eq!(log.events_of_type("OrderAssigned").len(), 2);
        assert_eq!(log.events_for_driver("D1").len(), 2);
        assert_eq!(log.events_for_order("O3")[0].sequence(), 2);
        assert!(log.events_for_order("missing").is_empty());
    }
}
