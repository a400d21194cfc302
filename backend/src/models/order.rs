//! Order model
//!
//! A customer order waiting to be delivered along a known route.
//! Orders are immutable input to a simulation run.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A delivery order
///
/// # Example
/// ```
/// use chrono::{TimeZone, Utc};
/// use delivery_simulator_core_rs::Order;
///
/// let created = Utc.with_ymd_and_hms(2025, 1, 6, 9, 0, 0).unwrap();
/// let order = Order::new("ORD-1", 1500.0, "R-7", created)
///     .with_delivered_at(created + chrono::Duration::minutes(35));
///
/// assert_eq!(order.route_id(), "R-7");
/// assert_eq!(order.observed_minutes(), Some(35.0));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    /// Unique order identifier
    id: String,

    /// Order value in rupees
    value: f64,

    /// Identifier of the route this order is delivered on
    route_id: String,

    /// When the order was placed
    created_at: DateTime<Utc>,

    /// When the order was actually delivered, if that has been observed
    delivered_at: Option<DateTime<Utc>>,
}

impl Order {
    pub fn new(
        id: impl Into<String>,
        value: f64,
        route_id: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            value,
            route_id: route_id.into(),
            created_at,
            delivered_at: None,
        }
    }

    /// Attach an observed delivery timestamp
    pub fn with_delivered_at(mut self, delivered_at: DateTime<Utc>) -> Self {
        self.delivered_at = Some(delivered_at);
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn route_id(&self) -> &str {
        &self.route_id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn delivered_at(&self) -> Option<DateTime<Utc>> {
        self.delivered_at
    }

    /// Observed delivery duration in whole minutes, rounded up.
    ///
    /// `None` when no delivery has been observed.
    pub fn observed_minutes(&self) -> Option<f64> {
        self.delivered_at.map(|delivered| {
            let elapsed_ms = (delivered - self.created_at).num_milliseconds() as f64;
            (elapsed_ms / 60_000.0).ceil()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn created() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, 8, 0, 0).unwrap()
    }

    #[test]
    fn test_observed_minutes_rounds_up_partial_minutes() {
        let order = Order::new("O1", 100.0, "R1", created())
            .with_delivered_at(created() + Duration::seconds(61));
        assert_eq!(order.observed_minutes(), Some(2.0));
    }

    #[test]
    fn test_observed_minutes_exact_minutes() {
        let order = Order::new("O1", 100.0, "R1", created())
            .with_delivered_at(created() + Duration::minutes(45));
        assert_eq!(order.observed_minutes(), Some(45.0));
    }

    #[test]
    fn test_no_observation() {
        let order = Order::new("O1", 100.0, "R1", created());
        assert_eq!(order.observed_minutes(), None);
    }
}
