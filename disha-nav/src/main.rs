//! DishaNav - beacon navigation daemon
//!
//! Wires the full stack together over the built-in demo venue:
//!
//! 1. Maintenance-time connectivity check (full discontinuity report)
//! 2. Route planning from the journey start to its destination
//! 3. Beacon adapter creation and lifecycle check
//! 4. Tracker thread consuming the adapter's event channel
//! 5. Main loop relaying route events until arrival or failure

use disha_nav::config::DishaConfig;
use disha_nav::error::{DishaError, Result};
use disha_nav::route::{RouteEvent, RouteTracker};
use disha_nav::shared::SharedNavState;
use disha_nav::threads::{create_route_channel, TrackerThread};
use disha_nav::venue::demo_venue;

use crossbeam_channel::RecvTimeoutError;
use dipa_io::{create_adapter, create_event_channel};
use marga_graph::{ConnectivityAnalyzer, RoutePlanner};
use std::env;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Parse config path from command line arguments.
///
/// Supports:
/// - `disha-nav <path>` (positional)
/// - `disha-nav --config <path>` (flag-based)
/// - `disha-nav -c <path>` (short flag)
///
/// Built-in demo defaults are used when no path is given.
fn parse_config_path() -> Option<String> {
    let args: Vec<String> = env::args().collect();

    for i in 1..args.len() {
        if (args[i] == "--config" || args[i] == "-c") && i + 1 < args.len() {
            return Some(args[i + 1].clone());
        }
    }

    if args.len() > 1 && !args[1].starts_with('-') {
        return Some(args[1].clone());
    }

    None
}

fn main() -> Result<()> {
    let config = match parse_config_path() {
        Some(path) => {
            let config = DishaConfig::from_file(&path)?;
            env_logger::Builder::from_env(
                env_logger::Env::default().default_filter_or(config.logging.level.clone()),
            )
            .init();
            log::info!("Using config: {}", path);
            config
        }
        None => {
            let config = DishaConfig::demo_defaults();
            env_logger::Builder::from_env(
                env_logger::Env::default().default_filter_or(config.logging.level.clone()),
            )
            .init();
            log::info!("Using built-in demo configuration");
            config
        }
    };

    log::info!("DishaNav v{} starting...", env!("CARGO_PKG_VERSION"));

    // Venue data provider boundary: graph plus beacon placement
    let venue = demo_venue();
    log::info!(
        "Venue loaded: {} nodes, {} edges, {} beacons",
        venue.graph.node_count(),
        venue.graph.edge_count(),
        venue.beacon_map.len()
    );

    // Maintenance-time check: the full discontinuity list goes to the
    // maintainer, not just a boolean
    let analyzer = ConnectivityAnalyzer::new(&venue.graph);
    if !analyzer.is_connected() {
        for (source, target) in analyzer.discontinuities() {
            log::warn!(
                "No path from {} to {}",
                venue.label(source),
                venue.label(target)
            );
        }
        return Err(DishaError::Plan(
            "venue graph is not fully traversable".to_string(),
        ));
    }
    log::info!("Connectivity check passed");

    // Plan the journey
    let plan = RoutePlanner::new(&venue.graph).plan(venue.start, venue.goal);
    if !plan.success {
        return Err(DishaError::Plan(format!(
            "no route from {} to {} ({:?})",
            venue.label(venue.start),
            venue.label(venue.goal),
            plan.failure_reason
        )));
    }
    let waypoints: Vec<String> = plan.path.iter().map(|&id| venue.label(id)).collect();
    log::info!(
        "Route planned: {} ({:.0}m)",
        waypoints.join(" -> "),
        plan.cost
    );

    // Beacon interface
    let (event_tx, event_rx) = create_event_channel();
    let mut adapter = create_adapter(&config.interface, event_tx)?;
    if let Some(reason) = adapter.state().failure_reason() {
        // Hard stop: a failed interface requires re-initialization
        return Err(DishaError::Beacon(dipa_io::Error::InitializationFailed(
            reason.to_string(),
        )));
    }

    // Tracker
    let mut tracker = RouteTracker::new(
        Arc::clone(&venue.graph),
        venue.beacon_map.clone(),
        config.tracker_config(),
    );
    tracker.set_plan(plan.path.clone())?;

    let shared = Arc::new(SharedNavState::new());
    let running = Arc::new(AtomicBool::new(true));
    let (route_tx, route_rx) = create_route_channel();

    let tracker_thread = TrackerThread::spawn(
        tracker,
        event_rx,
        route_tx,
        Arc::clone(&shared),
        Arc::clone(&running),
    );

    // Shutdown signal handler
    let ctrlc_shared = Arc::clone(&shared);
    ctrlc::set_handler(move || {
        log::info!("Received shutdown signal");
        ctrlc_shared.signal_shutdown();
    })
    .map_err(|e| DishaError::Config(format!("Error setting Ctrl-C handler: {}", e)))?;

    if config.interface.adapter.monitor_beacons {
        adapter.set_monitoring(true)?;
    }

    log::info!("DishaNav running. Press Ctrl-C to stop.");

    // Main loop: relay route events to the navigation consumer (the log)
    loop {
        if shared.should_shutdown() {
            break;
        }
        if let Some(reason) = shared.interface_failure() {
            log::error!("Navigation stopped: beacon interface failed ({})", reason);
            break;
        }

        match route_rx.recv_timeout(Duration::from_millis(200)) {
            Ok(RouteEvent::Advanced { node, index }) => {
                log::info!(
                    "Reached {} (step {}/{})",
                    venue.label(node),
                    index + 1,
                    plan.path.len()
                );
            }
            Ok(RouteEvent::Arrived { node }) => {
                log::info!("Arrived at {}", venue.label(node));
                break;
            }
            Ok(RouteEvent::SignalLost) => {
                // Soft warning: position is preserved while we wait
                log::warn!("Beacon signal lost; keeping last known position");
            }
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => break,
        }
    }

    // Shutdown: fence the adapter first so no delivery races the teardown
    log::info!("Shutting down...");
    adapter.set_monitoring(false)?;
    running.store(false, Ordering::Relaxed);
    if tracker_thread.join().is_err() {
        log::error!("Tracker thread panicked");
    }

    let progress = shared.progress();
    log::info!(
        "DishaNav stopped ({} deliveries, furthest step {:?})",
        shared.delivery_count(),
        progress.furthest_index.map(|i| i + 1)
    );
    Ok(())
}
