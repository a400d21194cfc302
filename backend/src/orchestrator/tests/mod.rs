mod test_concurrent_runs;
mod test_roster_conflict;

use crate::models::{Driver, Order, Route, TrafficLevel};
use crate::store::InMemoryStore;
use chrono::{TimeZone, Utc};

/// One Low route, `orders` orders of 500 on it, `drivers` idle drivers
pub(super) fn small_fleet(orders: usize, drivers: usize) -> InMemoryStore {
    let created = Utc.with_ymd_and_hms(2025, 1, 6, 9, 0, 0).unwrap();
    let orders: Vec<Order> = (0..orders)
        .map(|i| Order::new(format!("O{i}"), 500.0, "R1", created))
        .collect();
    let drivers: Vec<Driver> = (0..drivers)
        .map(|i| Driver::new(format!("D{i}"), format!("Driver {i}"), 0.0))
        .collect();
    let routes = vec![Route::new("R1", 10.0, TrafficLevel::Low, 30.0)];
    InMemoryStore::from_models(&orders, &drivers, &routes)
}
