//! End-to-end route following: mock adapter -> event channel -> tracker
//! thread, over the demo venue.

use disha_nav::route::{RouteEvent, RouteTracker, TrackerConfig};
use disha_nav::shared::SharedNavState;
use disha_nav::threads::{create_route_channel, TrackerThread};
use disha_nav::venue::{demo_interface_config, demo_venue};

use dipa_io::{create_adapter, create_event_channel};
use marga_graph::RoutePlanner;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Demo interface config compressed to test speed.
fn fast_interface_config() -> dipa_io::DipaConfig {
    let mut config = demo_interface_config();
    for step in &mut config.mock.script {
        step.hold_ms = 40;
    }
    config.mock.interval_ms = 5;
    config
}

fn fast_tracker_config() -> TrackerConfig {
    TrackerConfig {
        signal_timeout: Duration::from_millis(250),
        min_rssi: -90,
    }
}

#[test]
fn scripted_walk_reaches_the_gallery() {
    let venue = demo_venue();
    let plan = RoutePlanner::new(&venue.graph).plan(venue.start, venue.goal);
    assert!(plan.success);

    let (event_tx, event_rx) = create_event_channel();
    let mut adapter = create_adapter(&fast_interface_config(), event_tx).unwrap();
    assert!(adapter.state().is_operating());

    let mut tracker = RouteTracker::new(
        Arc::clone(&venue.graph),
        venue.beacon_map.clone(),
        fast_tracker_config(),
    );
    tracker.set_plan(plan.path.clone()).unwrap();

    let shared = Arc::new(SharedNavState::new());
    let running = Arc::new(AtomicBool::new(true));
    let (route_tx, route_rx) = create_route_channel();

    let thread = TrackerThread::spawn(
        tracker,
        event_rx,
        route_tx,
        Arc::clone(&shared),
        Arc::clone(&running),
    );

    adapter.set_monitoring(true).unwrap();

    // The scripted walk includes a flicker back to the lobby beacon; the
    // tracker must ride through it and arrive exactly once.
    let mut advances = Vec::new();
    let mut arrivals = 0;
    let deadline = Duration::from_secs(5);
    loop {
        match route_rx.recv_timeout(deadline) {
            Ok(RouteEvent::Advanced { node, .. }) => advances.push(node),
            Ok(RouteEvent::Arrived { node }) => {
                assert_eq!(node, venue.goal);
                arrivals += 1;
                break;
            }
            Ok(RouteEvent::SignalLost) => panic!("signal lost mid-walk"),
            Err(e) => panic!("no arrival: {}", e),
        }
    }
    assert_eq!(arrivals, 1);
    assert_eq!(advances, plan.path);

    // Teardown: fence the adapter, then stop the thread
    adapter.set_monitoring(false).unwrap();
    running.store(false, Ordering::Relaxed);
    thread.join().unwrap();

    let progress = shared.progress();
    assert!(progress.arrived);
    assert_eq!(progress.furthest_index, Some(plan.path.len() - 1));
    assert!(progress.remaining.is_empty());

    // Nothing else arrived after the single arrival
    assert!(!route_rx
        .try_iter()
        .any(|e| matches!(e, RouteEvent::Arrived { .. })));
}

#[test]
fn silence_after_the_script_raises_signal_lost_once() {
    let venue = demo_venue();

    // One visibility step, then the script ends and the radio goes quiet
    let mut interface = fast_interface_config();
    interface.mock.script.truncate(1);

    let (event_tx, event_rx) = create_event_channel();
    let mut adapter = create_adapter(&interface, event_tx).unwrap();

    let mut tracker = RouteTracker::new(
        Arc::clone(&venue.graph),
        venue.beacon_map.clone(),
        fast_tracker_config(),
    );
    tracker.set_plan(vec![0, 1, 2, 3]).unwrap();

    let shared = Arc::new(SharedNavState::new());
    let running = Arc::new(AtomicBool::new(true));
    let (route_tx, route_rx) = create_route_channel();

    let thread = TrackerThread::spawn(
        tracker,
        event_rx,
        route_tx,
        Arc::clone(&shared),
        Arc::clone(&running),
    );

    adapter.set_monitoring(true).unwrap();

    let mut lost = 0;
    let mut furthest_at_loss = None;
    let deadline = Duration::from_secs(5);
    while let Ok(event) = route_rx.recv_timeout(deadline) {
        if event == RouteEvent::SignalLost {
            lost += 1;
            furthest_at_loss = shared.progress().furthest_index;
            break;
        }
    }
    assert_eq!(lost, 1);
    // Progress was preserved through the loss
    assert_eq!(furthest_at_loss, Some(0));

    // The condition does not repeat while the silence continues
    assert!(route_rx.recv_timeout(Duration::from_millis(400)).is_err());

    adapter.set_monitoring(false).unwrap();
    running.store(false, Ordering::Relaxed);
    thread.join().unwrap();

    let progress = shared.progress();
    assert!(progress.signal_lost);
    assert!(!progress.arrived);
}
