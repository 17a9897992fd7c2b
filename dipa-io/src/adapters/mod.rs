//! Adapter implementations

pub mod mock;

pub use mock::MockAdapter;

use crate::config::DipaConfig;
use crate::core::adapter::BeaconAdapter;
use crate::core::events::EventSender;
use crate::error::{Error, Result};

/// Create a beacon adapter based on configuration.
///
/// The adapter is returned even when its setup failed: setup failure is
/// surfaced through the `Failed(reason)` lifecycle state (published on the
/// event channel and readable via [`BeaconAdapter::state`]), so callers
/// must check the state before relying on readings. Only configuration
/// misuse, an unknown adapter type, fails the factory itself.
///
/// Monitoring is not started here; the consumer decides when to enable it
/// after checking the interface state.
pub fn create_adapter(
    config: &DipaConfig,
    events: EventSender,
) -> Result<Box<dyn BeaconAdapter>> {
    match config.adapter.adapter_type.as_str() {
        "mock" => {
            let mut adapter = MockAdapter::new(config.mock.clone(), events);
            adapter.set_valid_beacons(config.adapter.valid_beacons.clone());
            adapter.set_needs_full_data(config.adapter.needs_full_data);
            Ok(Box::new(adapter))
        }
        other => Err(Error::UnknownAdapter(other.to_string())),
    }
}
