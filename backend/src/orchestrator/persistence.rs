//! Driver hours write-back
//!
//! Final hours are written one driver at a time, in roster order. The store
//! offers no transactions, so a failed write is compensated: every driver
//! already written is put back to its starting hours. The run then fails
//! with [`SimulationError::Persistence`], whose `rolled_back` flag says
//! whether every compensating write went through.

use crate::models::{Event, EventLog};
use crate::orchestrator::SimulationError;
use crate::store::RecordStore;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, warn};

/// Starting and final hours of one driver used in a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriverHours {
    pub driver_id: String,
    pub starting_hours: f64,
    pub final_hours: f64,
}

/// Write final hours for every driver, all or nothing.
pub fn persist_driver_hours<S: RecordStore + ?Sized>(
    store: &S,
    hours: &[DriverHours],
    events: &mut EventLog,
) -> Result<(), SimulationError> {
    for (sequence, entry) in hours.iter().enumerate() {
        match store.update_driver_hours(&entry.driver_id, entry.final_hours) {
            Ok(()) => {
                debug!(driver_id = %entry.driver_id, hours = entry.final_hours, "driver hours persisted");
                events.log(Event::DriverHoursPersisted {
                    sequence,
                    driver_id: entry.driver_id.clone(),
                    hours: entry.final_hours,
                });
            }
            Err(err) => {
                error!(driver_id = %entry.driver_id, error = %err, "failed to persist driver hours");
                let rolled_back = restore(store, &hours[..sequence], events);
                return Err(SimulationError::Persistence {
                    driver_id: entry.driver_id.clone(),
                    message: err.to_string(),
                    rolled_back,
                });
            }
        }
    }
    Ok(())
}

/// Put already-written drivers back to their starting hours.
///
/// Returns true when every restore succeeded.
fn restore<S: RecordStore + ?Sized>(store: &S, written: &[DriverHours], events: &mut EventLog) -> bool {
    let mut all_restored = true;
    for (sequence, entry) in written.iter().enumerate() {
        match store.update_driver_hours(&entry.driver_id, entry.starting_hours) {
            Ok(()) => {
                warn!(driver_id = %entry.driver_id, hours = entry.starting_hours, "driver hours restored");
                events.log(Event::DriverHoursRestored {
                    sequence,
                    driver_id: entry.driver_id.clone(),
                    hours: entry.starting_hours,
                });
            }
            Err(err) => {
                error!(driver_id = %entry.driver_id, error = %err, "failed to restore driver hours");
                all_restored = false;
            }
        }
    }
    all_restored
}
