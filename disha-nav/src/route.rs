//! Route tracking: beacon snapshots in, route progress out.
//!
//! The tracker is a single-writer state machine: it exclusively owns its
//! progress and must only be driven from one thread (the tracker worker in
//! this crate, or the test body). Every input is a complete snapshot of
//! currently visible beacons, never a diff.

use dipa_io::{BeaconId, BeaconReading};
use log::{debug, info, warn};
use marga_graph::{NodeId, VenueGraph};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::error::{DishaError, Result};

/// Route tracker tuning.
///
/// Both knobs are deployment parameters, not constants: the loss window
/// depends on the installed beacon advertising rate and the RSSI floor on
/// venue RF conditions.
#[derive(Debug, Clone)]
pub struct TrackerConfig {
    /// Window after the last delivery before signal is declared lost
    pub signal_timeout: Duration,
    /// Readings weaker than this floor are ignored (dBm)
    pub min_rssi: i16,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            signal_timeout: Duration::from_secs(5),
            min_rssi: -90,
        }
    }
}

/// Events emitted while following a route
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteEvent {
    /// Furthest-reached moved forward to this plan position
    Advanced {
        /// Node reached
        node: NodeId,
        /// Position along the planned sequence
        index: usize,
    },
    /// The final plan node was reached; fires exactly once per plan
    Arrived {
        /// The destination node
        node: NodeId,
    },
    /// No delivery within the timeout window; progress is preserved
    SignalLost,
}

/// Snapshot of route progress for consumers.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RouteProgress {
    /// Node the user is currently believed to be at ("unknown" when `None`)
    pub current_node: Option<NodeId>,
    /// Remaining nodes to the destination, in order
    pub remaining: Vec<NodeId>,
    /// Highest plan position ever attained; strictly non-decreasing
    pub furthest_index: Option<usize>,
    /// Destination reached
    pub arrived: bool,
    /// Soft warning: no recent beacon delivery
    pub signal_lost: bool,
}

/// Converts beacon reading snapshots into route progress against a venue
/// graph and a planned node sequence.
///
/// Advancement only ever moves the furthest-reached index forward along the
/// plan; a candidate node behind it still updates the displayed current
/// node (user feedback) but never regresses progress, so transient
/// cross-talk between adjacent beacons cannot flicker the route backwards.
pub struct RouteTracker {
    graph: Arc<VenueGraph>,
    beacon_map: HashMap<BeaconId, NodeId>,
    config: TrackerConfig,
    plan: Vec<NodeId>,
    furthest: Option<usize>,
    current: Option<NodeId>,
    arrived: bool,
    signal_lost: bool,
    last_delivery: Option<Instant>,
}

impl RouteTracker {
    /// Create a tracker over a venue graph and its beacon-to-node mapping.
    ///
    /// The mapping comes from the venue data provider; readings whose
    /// beacon is not mapped, or whose mapped node is not in the graph, are
    /// ignored during resolution.
    pub fn new(
        graph: Arc<VenueGraph>,
        beacon_map: HashMap<BeaconId, NodeId>,
        config: TrackerConfig,
    ) -> Self {
        Self {
            graph,
            beacon_map,
            config,
            plan: Vec::new(),
            furthest: None,
            current: None,
            arrived: false,
            signal_lost: false,
            last_delivery: None,
        }
    }

    /// Tracker tuning in effect
    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    /// Arm the tracker with a planned node sequence.
    ///
    /// Resets furthest-reached and the arrival latch; this is also how the
    /// tracker is re-armed after an arrival. Every plan node must exist in
    /// the graph and the plan must not be empty.
    pub fn set_plan(&mut self, plan: Vec<NodeId>) -> Result<()> {
        if plan.is_empty() {
            return Err(DishaError::Plan("planned route is empty".to_string()));
        }
        for &node in &plan {
            if !self.graph.contains_node(node) {
                return Err(DishaError::Graph(
                    marga_graph::GraphError::InvalidNodeReference(node),
                ));
            }
        }

        info!("Route armed: {} nodes", plan.len());
        self.plan = plan;
        self.furthest = None;
        self.arrived = false;
        Ok(())
    }

    /// Process one delivery: a complete snapshot of visible beacons.
    ///
    /// Returns the events this delivery caused, in order.
    pub fn on_readings(&mut self, readings: &[BeaconReading], now: Instant) -> Vec<RouteEvent> {
        self.last_delivery = Some(now);
        if self.signal_lost {
            info!("Beacon signal restored ({} visible)", readings.len());
            self.signal_lost = false;
        }

        let mut events = Vec::new();

        let Some(candidate) = self.resolve(readings) else {
            return events;
        };

        self.current = Some(candidate);

        if self.arrived || self.plan.is_empty() {
            return events;
        }

        if let Some(index) = self.plan.iter().position(|&n| n == candidate) {
            let advanced = match self.furthest {
                Some(furthest) => index > furthest,
                None => true,
            };
            if advanced {
                self.furthest = Some(index);
                info!(
                    "Route advanced: node {} (step {}/{})",
                    candidate,
                    index + 1,
                    self.plan.len()
                );
                events.push(RouteEvent::Advanced {
                    node: candidate,
                    index,
                });

                if index == self.plan.len() - 1 {
                    info!("Destination reached: node {}", candidate);
                    self.arrived = true;
                    events.push(RouteEvent::Arrived { node: candidate });
                }
            } else {
                debug!(
                    "Node {} is behind furthest-reached ({}), progress held",
                    candidate, index
                );
            }
        }

        events
    }

    /// Watchdog tick: declare the signal lost after the configured window.
    ///
    /// Emits at most one `SignalLost` until the next delivery; progress
    /// state is untouched. Before the first delivery there is nothing to
    /// lose, so no event fires.
    pub fn check_signal(&mut self, now: Instant) -> Option<RouteEvent> {
        if self.signal_lost {
            return None;
        }
        let last = self.last_delivery?;
        if now.duration_since(last) >= self.config.signal_timeout {
            warn!(
                "Beacon signal lost (no delivery for {:?})",
                self.config.signal_timeout
            );
            self.signal_lost = true;
            return Some(RouteEvent::SignalLost);
        }
        None
    }

    /// Current progress snapshot
    pub fn progress(&self) -> RouteProgress {
        let remaining = match self.furthest {
            Some(i) => self.plan.get(i + 1..).unwrap_or(&[]).to_vec(),
            None => self.plan.clone(),
        };
        RouteProgress {
            current_node: self.current,
            remaining,
            furthest_index: self.furthest,
            arrived: self.arrived,
            signal_lost: self.signal_lost,
        }
    }

    /// Map the snapshot to a candidate current node.
    ///
    /// Strongest reading wins: lowest proximity rank, then highest RSSI.
    fn resolve(&self, readings: &[BeaconReading]) -> Option<NodeId> {
        let mut best: Option<(&BeaconReading, NodeId)> = None;

        for reading in readings {
            if reading.rssi < self.config.min_rssi {
                continue;
            }
            let Some(&node) = self.beacon_map.get(&reading.id) else {
                debug!("Unmapped beacon {} ignored", reading.id);
                continue;
            };
            if !self.graph.contains_node(node) {
                warn!(
                    "Beacon {} maps to unknown node {}, ignored",
                    reading.id, node
                );
                continue;
            }
            let stronger = match &best {
                Some((current, _)) => reading.stronger_than(current),
                None => true,
            };
            if stronger {
                best = Some((reading, node));
            }
        }

        best.map(|(_, node)| node)
    }
}
