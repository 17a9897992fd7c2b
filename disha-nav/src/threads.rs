//! Tracker thread: the single consumer of the beacon event channel.
//!
//! Draining one channel from one thread serializes every notification for
//! the interface instance: state changes are observed before readings that
//! follow them, deliveries stay in adapter order, and the tracker is never
//! invoked concurrently with itself.

use crossbeam_channel::{RecvTimeoutError, Sender};
use dipa_io::{BeaconEvent, EventReceiver, InterfaceState};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crate::route::{RouteEvent, RouteTracker};
use crate::shared::SharedNavState;

/// Sender type for route events (navigation consumer side).
pub type RouteEventSender = Sender<RouteEvent>;

/// Receiver type for route events.
pub type RouteEventReceiver = crossbeam_channel::Receiver<RouteEvent>;

/// Create a new route event channel.
pub fn create_route_channel() -> (RouteEventSender, RouteEventReceiver) {
    crossbeam_channel::unbounded()
}

/// Tracker thread handle.
pub struct TrackerThread {
    handle: JoinHandle<()>,
}

impl TrackerThread {
    /// Spawn the tracker thread.
    ///
    /// # Arguments
    ///
    /// - `tracker`: Armed route tracker (moved in; the thread is its sole driver).
    /// - `events`: Beacon event channel receiver.
    /// - `route_tx`: Outbound route events for the navigation consumer.
    /// - `shared`: Shared state updated with progress snapshots.
    /// - `running`: Atomic flag for shutdown.
    pub fn spawn(
        tracker: RouteTracker,
        events: EventReceiver,
        route_tx: RouteEventSender,
        shared: Arc<SharedNavState>,
        running: Arc<AtomicBool>,
    ) -> Self {
        let handle = thread::Builder::new()
            .name("disha-tracker".into())
            .spawn(move || {
                run_tracker_loop(tracker, events, route_tx, shared, running);
            })
            .expect("Failed to spawn tracker thread");

        Self { handle }
    }

    /// Wait for the thread to finish.
    pub fn join(self) -> thread::Result<()> {
        self.handle.join()
    }
}

/// Main tracker loop.
fn run_tracker_loop(
    mut tracker: RouteTracker,
    events: EventReceiver,
    route_tx: RouteEventSender,
    shared: Arc<SharedNavState>,
    running: Arc<AtomicBool>,
) {
    log::info!("Tracker thread starting");

    // Wake often enough that the loss watchdog stays responsive relative
    // to its window
    let poll = (tracker.config().signal_timeout / 4).max(Duration::from_millis(10));

    while running.load(Ordering::Relaxed) {
        match events.recv_timeout(poll) {
            Ok(BeaconEvent::StateChanged(state)) => match state {
                InterfaceState::Failed(reason) => {
                    log::error!("Beacon interface failed: {}", reason);
                    shared.set_interface_failure(reason);
                }
                other => {
                    log::info!("Beacon interface state: {}", other);
                }
            },
            Ok(BeaconEvent::Readings(readings)) => {
                let produced = tracker.on_readings(&readings, Instant::now());
                shared.record_delivery();
                publish(&route_tx, produced);
                shared.update_progress(tracker.progress());
            }
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => {
                log::info!("Beacon event channel closed");
                break;
            }
        }

        if let Some(event) = tracker.check_signal(Instant::now()) {
            publish(&route_tx, vec![event]);
            shared.update_progress(tracker.progress());
        }
    }

    log::info!("Tracker thread shutting down");
}

fn publish(route_tx: &RouteEventSender, events: Vec<RouteEvent>) {
    for event in events {
        // A gone consumer only mutes the event stream; shared state still
        // carries the progress snapshot
        let _ = route_tx.send(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dipa_io::{create_event_channel, BeaconId, BeaconReading, Proximity};
    use marga_graph::{NodeKind, VenueGraph, VenueNode};
    use std::collections::HashMap;
    use std::sync::Arc;

    use crate::route::TrackerConfig;

    fn armed_tracker(timeout: Duration) -> RouteTracker {
        let mut graph = VenueGraph::new();
        let mut beacon_map = HashMap::new();
        for id in 0..3 {
            graph
                .add_node(VenueNode::new(id, NodeKind::BeaconAnchor))
                .unwrap();
            beacon_map.insert(BeaconId::new(60, id as u16), id);
        }
        graph.add_edge(0, 1, false, 1.0).unwrap();
        graph.add_edge(1, 2, false, 1.0).unwrap();

        let config = TrackerConfig {
            signal_timeout: timeout,
            min_rssi: -90,
        };
        let mut tracker = RouteTracker::new(Arc::new(graph), beacon_map, config);
        tracker.set_plan(vec![0, 1, 2]).unwrap();
        tracker
    }

    fn snapshot(minor: u16) -> BeaconEvent {
        BeaconEvent::Readings(vec![BeaconReading {
            id: BeaconId::new(60, minor),
            proximity: Proximity::Near,
            rssi: -55,
            accuracy: -1.0,
            timestamp_us: 0,
        }])
    }

    #[test]
    fn test_thread_follows_deliveries_to_arrival() {
        let (event_tx, event_rx) = create_event_channel();
        let (route_tx, route_rx) = create_route_channel();
        let shared = Arc::new(SharedNavState::new());
        let running = Arc::new(AtomicBool::new(true));

        let thread = TrackerThread::spawn(
            armed_tracker(Duration::from_secs(5)),
            event_rx,
            route_tx,
            Arc::clone(&shared),
            Arc::clone(&running),
        );

        for minor in [0u16, 1, 0, 2] {
            event_tx.send(snapshot(minor)).unwrap();
        }

        // Arrival must come through the route event channel
        let mut arrived = 0;
        let deadline = Duration::from_secs(2);
        while let Ok(event) = route_rx.recv_timeout(deadline) {
            if matches!(event, RouteEvent::Arrived { node: 2 }) {
                arrived += 1;
                break;
            }
        }
        assert_eq!(arrived, 1);

        running.store(false, Ordering::Relaxed);
        drop(event_tx);
        thread.join().unwrap();

        let progress = shared.progress();
        assert!(progress.arrived);
        assert_eq!(progress.furthest_index, Some(2));
        assert_eq!(shared.delivery_count(), 4);
    }

    #[test]
    fn test_state_failure_is_recorded_as_hard_stop() {
        let (event_tx, event_rx) = create_event_channel();
        let (route_tx, _route_rx) = create_route_channel();
        let shared = Arc::new(SharedNavState::new());
        let running = Arc::new(AtomicBool::new(true));

        let thread = TrackerThread::spawn(
            armed_tracker(Duration::from_secs(5)),
            event_rx,
            route_tx,
            Arc::clone(&shared),
            Arc::clone(&running),
        );

        event_tx
            .send(BeaconEvent::StateChanged(InterfaceState::Failed(
                "unsupported hardware".into(),
            )))
            .unwrap();

        // Give the thread a moment to drain
        std::thread::sleep(Duration::from_millis(100));
        assert_eq!(
            shared.interface_failure().as_deref(),
            Some("unsupported hardware")
        );

        running.store(false, Ordering::Relaxed);
        thread.join().unwrap();
    }

    #[test]
    fn test_watchdog_emits_signal_lost() {
        let (event_tx, event_rx) = create_event_channel();
        let (route_tx, route_rx) = create_route_channel();
        let shared = Arc::new(SharedNavState::new());
        let running = Arc::new(AtomicBool::new(true));

        let thread = TrackerThread::spawn(
            armed_tracker(Duration::from_millis(80)),
            event_rx,
            route_tx,
            Arc::clone(&shared),
            Arc::clone(&running),
        );

        // One delivery, then silence past the window
        event_tx.send(snapshot(0)).unwrap();

        let mut saw_lost = false;
        while let Ok(event) = route_rx.recv_timeout(Duration::from_secs(2)) {
            if event == RouteEvent::SignalLost {
                saw_lost = true;
                break;
            }
        }
        assert!(saw_lost);

        let progress = shared.progress();
        assert!(progress.signal_lost);
        assert_eq!(progress.furthest_index, Some(0));

        running.store(false, Ordering::Relaxed);
        thread.join().unwrap();
    }
}
