//! Typed event channel from adapter to consumers.
//!
//! Replaces a delegate/observer registration with an explicit channel: the
//! adapter holds only a [`EventSender`] (a non-owning handle to whoever is
//! listening), and the single consumer drains events in delivery order.
//! One consumer draining one channel serializes every notification for an
//! interface instance, so state changes are observed before any reading
//! produced after them and no two notifications are processed concurrently.
//! Dropping the receiver is the (idempotent) unregistration.

use crate::core::state::InterfaceState;
use crate::core::types::BeaconReading;

/// Events published by a beacon adapter.
#[derive(Debug, Clone, PartialEq)]
pub enum BeaconEvent {
    /// Interface lifecycle transition; published exactly once per transition
    StateChanged(InterfaceState),
    /// Full snapshot of currently in-range beacons; published when the set
    /// changes meaningfully, not on every raw radio sample
    Readings(Vec<BeaconReading>),
}

/// Sender half held by the adapter
pub type EventSender = crossbeam_channel::Sender<BeaconEvent>;

/// Receiver half drained by the consumer (route tracker, diagnostics)
pub type EventReceiver = crossbeam_channel::Receiver<BeaconEvent>;

/// Create a new adapter event channel.
pub fn create_event_channel() -> (EventSender, EventReceiver) {
    crossbeam_channel::unbounded()
}
