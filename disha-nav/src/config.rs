//! Configuration for DishaNav
//!
//! Loads configuration from a TOML file: tracker tuning, logging, and the
//! embedded beacon interface configuration.

use crate::error::Result;
use crate::route::TrackerConfig;
use crate::venue::demo_interface_config;
use dipa_io::DipaConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Top-level DishaNav configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DishaConfig {
    pub tracker: TrackerSection,
    pub logging: LoggingConfig,
    /// Beacon interface configuration (adapter selection + mock script)
    pub interface: DipaConfig,
}

/// Route tracker tuning
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TrackerSection {
    /// Loss-of-signal window in milliseconds
    pub signal_timeout_ms: u64,
    /// Readings weaker than this floor are ignored (dBm)
    pub min_rssi: i16,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
}

impl DishaConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: DishaConfig = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Default configuration: demo venue journey on the mock adapter
    pub fn demo_defaults() -> Self {
        Self {
            tracker: TrackerSection {
                signal_timeout_ms: 5000,
                min_rssi: -90,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
            },
            interface: demo_interface_config(),
        }
    }

    /// Tracker tuning derived from the `[tracker]` section
    pub fn tracker_config(&self) -> TrackerConfig {
        TrackerConfig {
            signal_timeout: Duration::from_millis(self.tracker.signal_timeout_ms),
            min_rssi: self.tracker.min_rssi,
        }
    }
}

impl Default for DishaConfig {
    fn default() -> Self {
        Self::demo_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = DishaConfig::demo_defaults();
        assert_eq!(config.tracker.signal_timeout_ms, 5000);
        assert_eq!(config.tracker.min_rssi, -90);
        assert_eq!(config.interface.adapter.adapter_type, "mock");

        let tracker = config.tracker_config();
        assert_eq!(tracker.signal_timeout, Duration::from_millis(5000));
    }

    #[test]
    fn test_toml_round_trip() {
        let config = DishaConfig::demo_defaults();
        let toml_string = toml::to_string_pretty(&config).unwrap();

        assert!(toml_string.contains("[tracker]"));
        assert!(toml_string.contains("[logging]"));
        assert!(toml_string.contains("[interface.adapter]"));

        let parsed: DishaConfig = toml::from_str(&toml_string).unwrap();
        assert_eq!(parsed.tracker.min_rssi, config.tracker.min_rssi);
        assert_eq!(
            parsed.interface.mock.script.len(),
            config.interface.mock.script.len()
        );
    }

    #[test]
    fn test_partial_override_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("disha.toml");

        let mut config = DishaConfig::demo_defaults();
        config.tracker.signal_timeout_ms = 1200;
        config.logging.level = "debug".to_string();
        config.to_file(&path).unwrap();

        let loaded = DishaConfig::from_file(&path).unwrap();
        assert_eq!(loaded.tracker.signal_timeout_ms, 1200);
        assert_eq!(loaded.logging.level, "debug");
    }
}
