//! Configuration for DipaIO
//!
//! Loads adapter configuration from a TOML file. The `[adapter]` section
//! selects and parameterizes the adapter; the `[mock]` section scripts the
//! deterministic stub used for hardware-free development and tests.

use crate::core::types::{BeaconId, Proximity};
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Top-level DipaIO configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DipaConfig {
    pub adapter: AdapterConfig,
    #[serde(default)]
    pub mock: MockAdapterConfig,
}

/// Adapter selection and capability flags
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AdapterConfig {
    /// Adapter implementation ("mock"; vendor adapters register here)
    #[serde(rename = "type")]
    pub adapter_type: String,

    /// Whether the consumer intends continuous range monitoring
    /// (one-shot discovery only when false)
    pub monitor_beacons: bool,

    /// Request richer per-beacon metadata (accuracy estimates)
    pub needs_full_data: bool,

    /// Restrict observations to these identifiers; `None` means no filter
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valid_beacons: Option<Vec<BeaconId>>,
}

/// Scripted mock adapter parameters
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MockAdapterConfig {
    /// Worker wake-up period in milliseconds
    pub interval_ms: u64,

    /// Restart the script from the top when it runs out
    pub loop_script: bool,

    /// Noise seed; 0 uses random entropy for non-deterministic behavior
    pub random_seed: u64,

    /// Gaussian RSSI jitter standard deviation (dBm); 0 disables noise
    pub rssi_noise_stddev: f32,

    /// Simulate a setup failure with this reason (e.g. missing credentials)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fail_setup: Option<String>,

    /// Fixed roster of simulated beacons
    pub roster: Vec<BeaconSpec>,

    /// Visibility timeline; each step holds a set of in-range beacons
    pub script: Vec<ScriptStep>,
}

/// One simulated beacon installation
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BeaconSpec {
    pub major: u16,
    pub minor: u16,
    /// Nominal signal strength when visible (dBm)
    pub base_rssi: i16,
}

/// One step of the visibility timeline
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ScriptStep {
    /// How long this visibility set holds, in milliseconds
    pub hold_ms: u64,
    /// Beacons in range during this step
    #[serde(default)]
    pub visible: Vec<VisibleBeacon>,
}

/// A roster entry visible during a script step
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VisibleBeacon {
    /// Index into the roster
    pub index: usize,
    /// Reported proximity class
    pub proximity: Proximity,
    /// Offset applied to the roster's base RSSI (dBm)
    #[serde(default)]
    pub rssi_offset: i16,
}

impl DipaConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: DipaConfig = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Default configuration driving the scripted mock adapter.
    ///
    /// Suitable for development and tests; deployments should use a proper
    /// TOML configuration file.
    pub fn mock_defaults() -> Self {
        Self {
            adapter: AdapterConfig {
                adapter_type: "mock".to_string(),
                monitor_beacons: true,
                needs_full_data: false,
                valid_beacons: None,
            },
            mock: MockAdapterConfig::default(),
        }
    }
}

impl Default for DipaConfig {
    fn default() -> Self {
        Self::mock_defaults()
    }
}

impl Default for MockAdapterConfig {
    fn default() -> Self {
        Self {
            roster: vec![
                BeaconSpec {
                    major: 100,
                    minor: 1,
                    base_rssi: -52,
                },
                BeaconSpec {
                    major: 100,
                    minor: 2,
                    base_rssi: -58,
                },
            ],
            script: vec![
                ScriptStep {
                    hold_ms: 400,
                    visible: vec![VisibleBeacon {
                        index: 0,
                        proximity: Proximity::Near,
                        rssi_offset: 0,
                    }],
                },
                ScriptStep {
                    hold_ms: 400,
                    visible: vec![VisibleBeacon {
                        index: 1,
                        proximity: Proximity::Immediate,
                        rssi_offset: 4,
                    }],
                },
            ],
            interval_ms: 50,
            loop_script: false,
            random_seed: 42,
            rssi_noise_stddev: 0.0,
            fail_setup: None,
        }
    }
}
