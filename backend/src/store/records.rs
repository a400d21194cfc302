//! Stored record shapes and their conversion into domain models
//!
//! Records arrive loosely typed: most fields are optional and some have
//! defaults. Conversion fills the defaults, checks the values, and yields
//! fully-typed models, so nothing past this module deals with missing
//! fields.
//!
//! | Record | Default applied |
//! |--------|-----------------|
//! | driver `currentShiftHours` | `0` |
//! | driver `pastWeekHours` | `[]` |
//! | route `trafficLevel` | `Low` |

use crate::models::{Driver, Order, Route, TrafficLevel};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A record that could not be turned into a model
#[derive(Debug, Error, PartialEq)]
pub enum RecordError {
    #[error("{record} record is missing required field '{field}'")]
    MissingField {
        record: &'static str,
        field: &'static str,
    },

    #[error("{record} record '{id}': {message}")]
    Invalid {
        record: &'static str,
        id: String,
        message: String,
    },
}

fn require<T>(value: Option<T>, record: &'static str, field: &'static str) -> Result<T, RecordError> {
    value.ok_or(RecordError::MissingField { record, field })
}

fn require_text(value: Option<String>, record: &'static str, field: &'static str) -> Result<String, RecordError> {
    match value {
        Some(text) if !text.trim().is_empty() => Ok(text),
        _ => Err(RecordError::MissingField { record, field }),
    }
}

fn invalid(record: &'static str, id: &str, message: String) -> RecordError {
    RecordError::Invalid {
        record,
        id: id.to_string(),
        message,
    }
}

/// Stored order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OrderRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_rs: Option<f64>,
    /// Route identifier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_timestamp: Option<DateTime<Utc>>,
}

impl OrderRecord {
    pub fn to_order(&self) -> Result<Order, RecordError> {
        const RECORD: &str = "order";
        let id = require_text(self.order_id.clone(), RECORD, "orderId")?;
        let value = require(self.value_rs, RECORD, "valueRs")?;
        if !value.is_finite() || value <= 0.0 {
            return Err(invalid(RECORD, &id, format!("order value must be a positive number, got {value}")));
        }
        let route = require_text(self.route.clone(), RECORD, "route")?;
        let created_at = require(self.created_at, RECORD, "createdAt")?;

        let order = Order::new(id, value, route, created_at);
        Ok(match self.delivery_timestamp {
            Some(delivered_at) => order.with_delivered_at(delivered_at),
            None => order,
        })
    }
}

impl From<&Order> for OrderRecord {
    fn from(order: &Order) -> Self {
        Self {
            order_id: Some(order.id().to_string()),
            value_rs: Some(order.value()),
            route: Some(order.route_id().to_string()),
            created_at: Some(order.created_at()),
            delivery_timestamp: order.delivered_at(),
        }
    }
}

/// Stored driver
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DriverRecord {
    #[serde(alias = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_shift_hours: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub past_week_hours: Option<Vec<f64>>,
}

impl DriverRecord {
    pub fn to_driver(&self) -> Result<Driver, RecordError> {
        const RECORD: &str = "driver";
        let id = require_text(self.id.clone(), RECORD, "id")?;
        let name = require_text(self.name.clone(), RECORD, "name")?;
        let hours = self.current_shift_hours.unwrap_or(0.0);
        if !hours.is_finite() || hours < 0.0 {
            return Err(invalid(RECORD, &id, format!("shift hours cannot be negative, got {hours}")));
        }
        let past_week = self.past_week_hours.clone().unwrap_or_default();
        Ok(Driver::new(id, name, hours).with_past_week_hours(past_week))
    }
}

impl From<&Driver> for DriverRecord {
    fn from(driver: &Driver) -> Self {
        Self {
            id: Some(driver.id().to_string()),
            name: Some(driver.name().to_string()),
            current_shift_hours: Some(driver.current_shift_hours()),
            past_week_hours: Some(driver.past_week_hours().to_vec()),
        }
    }
}

/// Stored route
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RouteRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_km: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub traffic_level: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_time_min: Option<f64>,
}

impl RouteRecord {
    pub fn to_route(&self) -> Result<Route, RecordError> {
        const RECORD: &str = "route";
        let id = require_text(self.route_id.clone(), RECORD, "routeId")?;
        let distance = require(self.distance_km, RECORD, "distanceKm")?;
        if !distance.is_finite() || distance <= 0.0 {
            return Err(invalid(RECORD, &id, format!("distance must be a positive number, got {distance}")));
        }
        let base_time = require(self.base_time_min, RECORD, "baseTimeMin")?;
        if !base_time.is_finite() || base_time <= 0.0 {
            return Err(invalid(RECORD, &id, format!("base time must be a positive number, got {base_time}")));
        }
        let traffic = match &self.traffic_level {
            Some(level) => level
                .parse::<TrafficLevel>()
                .map_err(|e| invalid(RECORD, &id, e.to_string()))?,
            None => TrafficLevel::Low,
        };
        Ok(Route::new(id, distance, traffic, base_time))
    }
}

impl From<&Route> for RouteRecord {
    fn from(route: &Route) -> Self {
        Self {
            route_id: Some(route.id.clone()),
            distance_km: Some(route.distance_km),
            traffic_level: Some(route.traffic.to_string()),
            base_time_min: Some(route.base_time_min),
        }
    }
}

/// Every stored collection; the on-disk format of a JSON dataset
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Dataset {
    pub orders: Vec<OrderRecord>,
    pub drivers: Vec<DriverRecord>,
    pub routes: Vec<RouteRecord>,
}

impl Dataset {
    /// Build a dataset from domain models
    pub fn from_models(orders: &[Order], drivers: &[Driver], routes: &[Route]) -> Self {
        Self {
            orders: orders.iter().map(OrderRecord::from).collect(),
            drivers: drivers.iter().map(DriverRecord::from).collect(),
            routes: routes.iter().map(RouteRecord::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_driver_defaults() {
        let record: DriverRecord = serde_json::from_str(r#"{"_id": "d1", "name": "Ravi"}"#).unwrap();
        let driver = record.to_driver().unwrap();
        assert_eq!(driver.id(), "d1");
        assert_eq!(driver.current_shift_hours(), 0.0);
        assert!(driver.past_week_hours().is_empty());
    }

    #[test]
    fn test_driver_negative_hours_rejected() {
        let record = DriverRecord {
            id: Some("d1".to_string()),
            name: Some("Ravi".to_string()),
            current_shift_hours: Some(-1.0),
            past_week_hours: None,
        };
        assert!(matches!(record.to_driver(), Err(RecordError::Invalid { .. })));
    }

    #[test]
    fn test_blank_name_is_missing() {
        let record = DriverRecord {
            id: Some("d1".to_string()),
            name: Some("   ".to_string()),
            ..Default::default()
        };
        assert_eq!(
            record.to_driver(),
            Err(RecordError::MissingField {
                record: "driver",
                field: "name"
            })
        );
    }

    #[test]
    fn test_route_traffic_default_and_unknown() {
        let record: RouteRecord =
            serde_json::from_str(r#"{"routeId": "R1", "distanceKm": 12.5, "baseTimeMin": 30}"#).unwrap();
        assert_eq!(record.to_route().unwrap().traffic, TrafficLevel::Low);

        let record = RouteRecord {
            traffic_level: Some("Gridlock".to_string()),
            ..record
        };
        assert!(record.to_route().is_err());
    }

    #[test]
    fn test_route_zero_distance_rejected() {
        let record = RouteRecord {
            route_id: Some("R1".to_string()),
            distance_km: Some(0.0),
            traffic_level: None,
            base_time_min: Some(10.0),
        };
        assert!(record.to_route().is_err());
    }

    #[test]
    fn test_order_parses_timestamps() {
        let record: OrderRecord = serde_json::from_str(
            r#"{
                "orderId": "O1",
                "valueRs": 1200,
                "route": "R1",
                "createdAt": "2025-01-06T09:00:00Z",
                "deliveryTimestamp": "2025-01-06T09:42:10Z"
            }"#,
        )
        .unwrap();
        let order = record.to_order().unwrap();
        assert_eq!(order.observed_minutes(), Some(43.0));
    }

    #[test]
    fn test_order_requires_created_at_and_positive_value() {
        let record = OrderRecord {
            order_id: Some("O1".to_string()),
            value_rs: Some(100.0),
            route: Some("R1".to_string()),
            created_at: None,
            delivery_timestamp: None,
        };
        assert_eq!(
            record.to_order(),
            Err(RecordError::MissingField {
                record: "order",
                field: "createdAt"
            })
        );

        let record = OrderRecord {
            value_rs: Some(0.0),
            created_at: Some(Utc::now()),
            ..record
        };
        assert!(matches!(record.to_order(), Err(RecordError::Invalid { .. })));
    }
}
