//! Route index
//!
//! Read-only lookup from route identifier to route, built fresh for every
//! run from the fetched route collection.

use crate::models::Route;
use std::collections::HashMap;

/// Immutable per-run route lookup
///
/// When two routes share an identifier the later one wins, matching a
/// map built by inserting the fetched collection in order.
///
/// # Example
/// ```
/// use delivery_simulator_core_rs::{Route, RouteIndex, TrafficLevel};
///
/// let index = RouteIndex::new(vec![Route::new("R1", 12.0, TrafficLevel::Low, 30.0)]);
/// assert!(index.get("R1").is_some());
/// assert!(index.get("R2").is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct RouteIndex {
    routes: HashMap<String, Route>,
    source_len: usize,
}

impl RouteIndex {
    pub fn new(routes: impl IntoIterator<Item = Route>) -> Self {
        let mut source_len = 0;
        let routes = routes
            .into_iter()
            .inspect(|_| source_len += 1)
            .map(|route| (route.id.clone(), route))
            .collect();
        Self { routes, source_len }
    }

    pub fn get(&self, route_id: &str) -> Option<&Route> {
        self.routes.get(route_id)
    }

    /// Number of distinct route identifiers
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Number of routes the index was built from, duplicates included
    pub fn source_len(&self) -> usize {
        self.source_len
    }
}
