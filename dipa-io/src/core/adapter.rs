//! BeaconAdapter trait definition

use crate::core::state::InterfaceState;
use crate::core::types::{BeaconId, BeaconReading};
use crate::error::Result;

/// Completion callback for a single-shot discovery call.
///
/// Invoked exactly once per `get_beacons` call, synchronously or
/// asynchronously, never zero and never multiple times.
pub type ScanCompletion = Box<dyn FnOnce(Result<Vec<BeaconReading>>) + Send>;

/// Beacon interface capability set.
///
/// Implemented by vendor SDK adapters, the demo stub, and test mocks alike.
/// This is the whole contract: no implementation may add hidden
/// capabilities consumers rely on.
///
/// Continuous observations are delivered on the event channel the adapter
/// was constructed with, as full in-range snapshots whenever the visible
/// set changes. Readings flow only while [`BeaconAdapter::state`] is
/// `Operating`.
pub trait BeaconAdapter: Send {
    /// Fetch the currently known beacons, once.
    ///
    /// A per-call failure is reported through the completion as
    /// [`crate::Error::Api`] and does not change the interface state.
    fn get_beacons(&mut self, completion: ScanCompletion);

    /// Restrict observations to an allow-list of identifiers.
    ///
    /// `None` lifts the restriction. Applies to both monitoring deliveries
    /// and `get_beacons` answers.
    fn set_valid_beacons(&mut self, allow: Option<Vec<BeaconId>>);

    /// Enable or disable continuous range monitoring.
    ///
    /// Disabling is idempotent and fences in-flight callbacks: after the
    /// call returns, no further delivery reaches the event channel.
    /// Enabling requires the `Operating` state.
    fn set_monitoring(&mut self, enabled: bool) -> Result<()>;

    /// Request richer per-beacon metadata (accuracy estimates) when the
    /// underlying source can provide it.
    fn set_needs_full_data(&mut self, enabled: bool);

    /// Current lifecycle state.
    ///
    /// Callers must check this before relying on readings; setup failure is
    /// surfaced here as `Failed(reason)`, not as a constructor error.
    fn state(&self) -> InterfaceState;
}
