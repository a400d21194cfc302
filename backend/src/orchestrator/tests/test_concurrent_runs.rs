// Runs sharing a simulator must not lose each other's hours.
//
// Without serialisation both runs would read 0h, both would write 0.5h,
// and one run's work would vanish.

use super::small_fleet;
use crate::orchestrator::{SimulationRequest, Simulator};
use crate::store::RecordStore;
use std::sync::Arc;
use std::thread;

#[test]
fn test_concurrent_runs_accumulate_hours() {
    let simulator = Arc::new(Simulator::new(small_fleet(1, 1)));
    let request = SimulationRequest::new(1, "09:00", 24.0);

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let simulator = Arc::clone(&simulator);
            let request = request.clone();
            thread::spawn(move || simulator.run(&request).map(|r| r.persisted))
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap().unwrap(), true);
    }

    // Four runs, each a single 30 minute delivery
    let drivers = simulator.store().fetch_drivers().unwrap();
    assert_eq!(drivers[0].current_shift_hours(), 2.0);
}

#[test]
fn test_sequential_runs_see_previous_hours() {
    let simulator = Simulator::new(small_fleet(2, 1));
    let request = SimulationRequest::new(1, "09:00", 8.0);

    let first = simulator.run(&request).unwrap();
    assert_eq!(first.driver_hours[0].starting_hours, 0.0);
    assert_eq!(first.driver_hours[0].final_hours, 1.0);

    let second = simulator.run(&request).unwrap();
    assert_eq!(second.driver_hours[0].starting_hours, 1.0);
    assert_eq!(second.driver_hours[0].final_hours, 2.0);
}
