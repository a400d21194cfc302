//! Order allocation
//!
//! Places orders on drivers with a rotating cursor and a per-driver hour
//! cap. The policy is greedy and single-pass: for each order, probe up to
//! `D` drivers starting at the cursor, advancing the cursor after every
//! probe, and take the first driver whose running hours are strictly below
//! the cap. When a full sweep finds nobody, allocation stops and that order
//! and every later one stay unassigned.
//!
//! The cursor and running hours live in an explicit [`AllocationState`]
//! that is threaded through [`allocate`] and handed back afterwards, so a
//! batch can be allocated, inspected and continued without hidden state.
//!
//! # Example
//!
//! ```rust
//! use chrono::Utc;
//! use delivery_simulator_core_rs::allocation::{allocate, AllocationState};
//! use delivery_simulator_core_rs::Order;
//!
//! let now = Utc::now();
//! let orders = vec![
//!     Order::new("O1", 500.0, "R1", now),
//!     Order::new("O2", 500.0, "R1", now),
//! ];
//!
//! // Three idle drivers, each order takes 30 minutes
//! let state = AllocationState::new(vec![0.0, 0.0, 0.0]);
//! let (outcome, state) = allocate(state, &orders, 8.0, |_, _| Some(30.0));
//!
//! let drivers: Vec<usize> = outcome.assignments.iter().map(|a| a.driver).collect();
//! assert_eq!(drivers, vec![0, 1]);
//! assert_eq!(state.hours(), &[0.5, 0.5, 0.0]);
//! assert!(outcome.unassigned.is_empty());
//! ```

use crate::models::Order;

/// Cursor position and running hours of the drivers in play
#[derive(Debug, Clone, PartialEq)]
pub struct AllocationState {
    /// Next driver index to probe
    cursor: usize,

    /// Running cumulative hours per driver, indexed like the roster
    hours: Vec<f64>,
}

impl AllocationState {
    /// Start a run with the drivers' current cumulative hours
    pub fn new(starting_hours: Vec<f64>) -> Self {
        Self {
            cursor: 0,
            hours: starting_hours,
        }
    }

    /// Resume from a known cursor position
    pub fn with_cursor(mut self, cursor: usize) -> Self {
        self.cursor = if self.hours.is_empty() {
            0
        } else {
            cursor % self.hours.len()
        };
        self
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn hours(&self) -> &[f64] {
        &self.hours
    }

    pub fn driver_count(&self) -> usize {
        self.hours.len()
    }

    pub fn into_hours(self) -> Vec<f64> {
        self.hours
    }

    /// Probe up to `D` drivers from the cursor for one under `max_hours`.
    ///
    /// The cursor advances after every probe, whether or not it succeeds.
    fn next_driver(&mut self, max_hours: f64) -> Option<usize> {
        let count = self.hours.len();
        for _ in 0..count {
            let candidate = self.cursor;
            self.cursor = (self.cursor + 1) % count;
            if self.hours[candidate] < max_hours {
                return Some(candidate);
            }
        }
        None
    }

    /// Add delivery minutes to a driver's running hours
    fn record_minutes(&mut self, driver: usize, minutes: f64) {
        self.hours[driver] += minutes / 60.0;
    }
}

/// An order placed on a driver
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    /// Position of the order in the batch
    pub sequence: usize,

    pub order_id: String,

    /// Index of the driver in the roster
    pub driver: usize,

    /// Driver's running hours just before this order
    pub hours_before: f64,
}

/// Result of allocating one batch
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AllocationOutcome {
    /// Placements in order of the batch
    pub assignments: Vec<Assignment>,

    /// Identifiers of the orders left unassigned, in batch order
    pub unassigned: Vec<String>,
}

impl AllocationOutcome {
    /// True when allocation stopped before the end of the batch
    pub fn exhausted(&self) -> bool {
        !self.unassigned.is_empty()
    }
}

/// Allocate a batch of orders, in order.
///
/// `work` is called once per placement with the order and its assignment
/// and returns the minutes the delivery takes, which are added to the
/// driver's running hours before the next order is considered. Returning
/// `None` places the order without adding any hours.
///
/// Returns the outcome together with the updated state.
pub fn allocate<F>(
    mut state: AllocationState,
    orders: &[Order],
    max_hours: f64,
    mut work: F,
) -> (AllocationOutcome, AllocationState)
where
    F: FnMut(&Order, &Assignment) -> Option<f64>,
{
    let mut outcome = AllocationOutcome::default();

    for (sequence, order) in orders.iter().enumerate() {
        let Some(driver) = state.next_driver(max_hours) else {
            outcome.unassigned = orders[sequence..]
                .iter()
                .map(|o| o.id().to_string())
                .collect();
            break;
        };

        let assignment = Assignment {
            sequence,
            order_id: order.id().to_string(),
            driver,
            hours_before: state.hours[driver],
        };

        if let Some(minutes) = work(order, &assignment) {
            state.record_minutes(driver, minutes);
        }
        outcome.assignments.push(assignment);
    }

    (outcome, state)
}
