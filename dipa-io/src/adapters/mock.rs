//! Deterministic scripted beacon adapter.
//!
//! Simulates a beacon installation without hardware: a fixed roster of
//! beacons and a timeline of visibility steps drive the same event channel
//! a vendor adapter would. With a non-zero seed and zero noise the whole
//! run is reproducible, which is what the demo daemon and the tests use.

use crate::config::MockAdapterConfig;
use crate::core::adapter::{BeaconAdapter, ScanCompletion};
use crate::core::events::{BeaconEvent, EventSender};
use crate::core::state::{InterfaceState, StateCell};
use crate::core::types::{now_us, BeaconId, BeaconReading, Proximity};
use crate::error::{Error, Result};
use log::{debug, info};
use parking_lot::Mutex;
use rand::prelude::*;
use rand::rngs::SmallRng;
use rand_distr::StandardNormal;
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// Gaussian noise with deterministic seeding.
///
/// If seed is 0, uses random entropy for non-deterministic behavior.
struct NoiseGenerator {
    rng: SmallRng,
}

impl NoiseGenerator {
    fn new(seed: u64) -> Self {
        let rng = if seed == 0 {
            SmallRng::from_entropy()
        } else {
            SmallRng::seed_from_u64(seed)
        };
        Self { rng }
    }

    #[inline]
    fn gaussian(&mut self, stddev: f32) -> f32 {
        if stddev == 0.0 {
            return 0.0;
        }
        let n: f32 = self.rng.sample(StandardNormal);
        n * stddev
    }
}

/// State shared between the adapter handle and its worker thread
struct Shared {
    allow: Mutex<Option<HashSet<BeaconId>>>,
    full_data: AtomicBool,
    script_pos: AtomicUsize,
}

/// Scripted mock implementation of the beacon capability set
pub struct MockAdapter {
    config: MockAdapterConfig,
    state: Arc<StateCell>,
    events: EventSender,
    shared: Arc<Shared>,
    running: Arc<AtomicBool>,
    worker: Option<JoinHandle<()>>,
}

impl MockAdapter {
    /// Create the adapter and run its (synchronous) setup.
    ///
    /// Setup failure, a configured `fail_setup` reason or a script that
    /// references beacons outside the roster, lands in the `Failed` state;
    /// the constructor itself never fails.
    pub fn new(config: MockAdapterConfig, events: EventSender) -> Self {
        let state = Arc::new(StateCell::new(events.clone()));

        let setup_error = config
            .fail_setup
            .clone()
            .or_else(|| validate_script(&config));

        match setup_error {
            Some(reason) => state.transition(InterfaceState::Failed(reason)),
            None => {
                info!(
                    "Mock adapter ready: {} beacons, {} script steps",
                    config.roster.len(),
                    config.script.len()
                );
                state.transition(InterfaceState::Operating);
            }
        }

        Self {
            config,
            state,
            events,
            shared: Arc::new(Shared {
                allow: Mutex::new(None),
                full_data: AtomicBool::new(false),
                script_pos: AtomicUsize::new(0),
            }),
            running: Arc::new(AtomicBool::new(false)),
            worker: None,
        }
    }
}

impl BeaconAdapter for MockAdapter {
    fn get_beacons(&mut self, completion: ScanCompletion) {
        let state = self.state.get();
        if !state.is_operating() {
            completion(Err(Error::Api(format!("interface {}", state))));
            return;
        }

        let pos = self.shared.script_pos.load(Ordering::Acquire);
        let snapshot = build_snapshot(&self.config, &self.shared, pos, None);
        completion(Ok(snapshot));
    }

    fn set_valid_beacons(&mut self, allow: Option<Vec<BeaconId>>) {
        *self.shared.allow.lock() = allow.map(|ids| ids.into_iter().collect());
    }

    fn set_monitoring(&mut self, enabled: bool) -> Result<()> {
        if !enabled {
            // Idempotent stop: fence by joining the worker so no delivery
            // can arrive after this call returns.
            self.running.store(false, Ordering::Release);
            if let Some(handle) = self.worker.take() {
                let _ = handle.join();
            }
            return Ok(());
        }

        if !self.state.get().is_operating() {
            return Err(Error::NotOperating);
        }

        if let Some(handle) = self.worker.take() {
            if !handle.is_finished() {
                // Already monitoring
                self.worker = Some(handle);
                return Ok(());
            }
            // Script ran out earlier; reap the finished worker and restart
            let _ = handle.join();
        }

        self.running.store(true, Ordering::Release);

        let config = self.config.clone();
        let shared = Arc::clone(&self.shared);
        let events = self.events.clone();
        let running = Arc::clone(&self.running);

        let handle = thread::Builder::new()
            .name("dipa-mock".to_string())
            .spawn(move || run_script_loop(config, shared, events, running))
            .map_err(|e| Error::Api(format!("Failed to spawn mock worker: {}", e)))?;

        self.worker = Some(handle);
        Ok(())
    }

    fn set_needs_full_data(&mut self, enabled: bool) {
        self.shared.full_data.store(enabled, Ordering::Release);
    }

    fn state(&self) -> InterfaceState {
        self.state.get()
    }
}

impl Drop for MockAdapter {
    fn drop(&mut self) {
        let _ = self.set_monitoring(false);
    }
}

/// Check every script step only references roster entries
fn validate_script(config: &MockAdapterConfig) -> Option<String> {
    for (pos, step) in config.script.iter().enumerate() {
        for visible in &step.visible {
            if visible.index >= config.roster.len() {
                return Some(format!(
                    "script step {} references beacon index {} (roster has {})",
                    pos,
                    visible.index,
                    config.roster.len()
                ));
            }
        }
    }
    None
}

/// Nominal accuracy estimate for a proximity class (meters)
fn nominal_accuracy(proximity: Proximity) -> f32 {
    match proximity {
        Proximity::Immediate => 0.5,
        Proximity::Near => 2.0,
        Proximity::Far => 8.0,
        Proximity::Unknown => -1.0,
    }
}

/// Build the in-range snapshot for a script position.
///
/// Applies the allow-list and the full-data flag; `noise` jitters RSSI when
/// configured (discovery answers pass `None` to stay exact).
fn build_snapshot(
    config: &MockAdapterConfig,
    shared: &Shared,
    pos: usize,
    mut noise: Option<&mut NoiseGenerator>,
) -> Vec<BeaconReading> {
    let Some(step) = config.script.get(pos) else {
        return Vec::new();
    };

    let allow = shared.allow.lock();
    let full_data = shared.full_data.load(Ordering::Acquire);

    step.visible
        .iter()
        .filter_map(|visible| {
            let spec = config.roster.get(visible.index)?;
            let id = BeaconId::new(spec.major, spec.minor);
            if let Some(allowed) = allow.as_ref() {
                if !allowed.contains(&id) {
                    return None;
                }
            }

            let jitter = noise
                .as_deref_mut()
                .map(|n| n.gaussian(config.rssi_noise_stddev))
                .unwrap_or(0.0);

            Some(BeaconReading {
                id,
                proximity: visible.proximity,
                rssi: spec.base_rssi + visible.rssi_offset + jitter.round() as i16,
                accuracy: if full_data {
                    nominal_accuracy(visible.proximity)
                } else {
                    -1.0
                },
                timestamp_us: now_us(),
            })
        })
        .collect()
}

/// Worker loop: walk the script, publishing a snapshot whenever the
/// in-range set changes (beacon added, removed, or proximity class moved).
fn run_script_loop(
    config: MockAdapterConfig,
    shared: Arc<Shared>,
    events: EventSender,
    running: Arc<AtomicBool>,
) {
    info!("Mock beacon script started ({} steps)", config.script.len());

    let tick = Duration::from_millis(config.interval_ms.max(1));

    if config.script.is_empty() {
        while running.load(Ordering::Acquire) {
            thread::sleep(tick);
        }
        return;
    }

    let mut noise = NoiseGenerator::new(config.random_seed);
    let mut last_published: Option<Vec<(BeaconId, Proximity)>> = None;

    'outer: loop {
        for (pos, step) in config.script.iter().enumerate() {
            shared.script_pos.store(pos, Ordering::Release);

            let snapshot = build_snapshot(&config, &shared, pos, Some(&mut noise));
            let key: Vec<(BeaconId, Proximity)> =
                snapshot.iter().map(|r| (r.id, r.proximity)).collect();

            if last_published.as_ref() != Some(&key) {
                debug!(
                    "Mock: step {} -> {} in-range beacons",
                    pos,
                    snapshot.len()
                );
                if events.send(BeaconEvent::Readings(snapshot)).is_err() {
                    // Consumer unregistered
                    break 'outer;
                }
                last_published = Some(key);
            }

            let hold = Duration::from_millis(step.hold_ms);
            let start = Instant::now();
            loop {
                if !running.load(Ordering::Acquire) {
                    break 'outer;
                }
                let Some(remaining) = hold.checked_sub(start.elapsed()) else {
                    break;
                };
                thread::sleep(tick.min(remaining));
            }
        }

        if !config.loop_script {
            break;
        }
    }

    info!("Mock beacon script stopped");
}
