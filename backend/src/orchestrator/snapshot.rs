//! Roster snapshot - optimistic concurrency for driver hours
//!
//! A run reads every driver's hours, computes for a while, then writes new
//! totals. If anyone else changed the roster in between, writing would
//! silently discard their change. The snapshot taken at fetch time carries
//! a SHA-256 fingerprint of the roster; the fingerprint is recomputed from
//! a fresh fetch just before persisting and the run is aborted on mismatch.
//!
//! # Critical Invariants
//!
//! - **Order sensitive**: the fingerprint covers drivers in roster order,
//!   since roster position decides which drivers a run uses
//! - **Exact**: hours are hashed by bit pattern, not by rounded value

use crate::models::Driver;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

// ============================================================================
// Snapshot Structures
// ============================================================================

/// Hours of one driver at snapshot time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriverSnapshot {
    pub id: String,
    pub hours: f64,
}

impl From<&Driver> for DriverSnapshot {
    fn from(driver: &Driver) -> Self {
        DriverSnapshot {
            id: driver.id().to_string(),
            hours: driver.current_shift_hours(),
        }
    }
}

/// Full roster as read at the start of a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterSnapshot {
    pub drivers: Vec<DriverSnapshot>,

    /// Hex SHA-256 over (id, hours) pairs in roster order
    pub fingerprint: String,
}

impl RosterSnapshot {
    pub fn capture(drivers: &[Driver]) -> Self {
        let drivers: Vec<DriverSnapshot> = drivers.iter().map(DriverSnapshot::from).collect();
        let fingerprint = compute_roster_fingerprint(&drivers);
        Self {
            drivers,
            fingerprint,
        }
    }

    /// True when `other` describes the same roster
    pub fn matches(&self, other: &RosterSnapshot) -> bool {
        self.fingerprint == other.fingerprint
    }
}

// ============================================================================
// Fingerprinting
// ============================================================================

/// Compute a deterministic SHA-256 fingerprint of a roster
///
/// Each driver contributes its id length, id bytes and the bit pattern of
/// its hours, so no two distinct rosters share an encoding.
pub fn compute_roster_fingerprint(drivers: &[DriverSnapshot]) -> String {
    let mut hasher = Sha256::new();
    hasher.update((drivers.len() as u64).to_le_bytes());
    for driver in drivers {
        hasher.update((driver.id.len() as u64).to_le_bytes());
        hasher.update(driver.id.as_bytes());
        hasher.update(driver.hours.to_bits().to_le_bytes());
    }
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster(hours: &[f64]) -> Vec<Driver> {
        hours
            .iter()
            .enumerate()
            .map(|(i, h)| Driver::new(format!("D{i}"), format!("Driver {i}"), *h))
            .collect()
    }

    #[test]
    fn test_same_roster_same_fingerprint() {
        let a = RosterSnapshot::capture(&roster(&[1.0, 2.5]));
        let b = RosterSnapshot::capture(&roster(&[1.0, 2.5]));
        assert!(a.matches(&b));
        assert_eq!(a.fingerprint.len(), 64);
    }

    #[test]
    fn test_hours_change_detected() {
        let a = RosterSnapshot::capture(&roster(&[1.0, 2.5]));
        let b = RosterSnapshot::capture(&roster(&[1.0, 2.5000001]));
        assert!(!a.matches(&b));
    }

    #[test]
    fn test_order_matters() {
        let mut drivers = roster(&[1.0, 2.0]);
        let a = RosterSnapshot::capture(&drivers);
        drivers.reverse();
        let b = RosterSnapshot::capture(&drivers);
        assert!(!a.matches(&b));
    }

    #[test]
    fn test_names_do_not_matter() {
        let a = RosterSnapshot::capture(&[Driver::new("D1", "Asha", 3.0)]);
        let b = RosterSnapshot::capture(&[Driver::new("D1", "Asha K", 3.0)]);
        assert!(a.matches(&b));
    }
}
