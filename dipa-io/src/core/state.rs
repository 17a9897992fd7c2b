//! Interface lifecycle state machine.

use crate::core::events::{BeaconEvent, EventSender};
use log::{error, info, warn};
use parking_lot::Mutex;
use std::fmt;

/// Beacon interface lifecycle state.
///
/// `Operating` is the only state from which readings are delivered. There
/// is no way out of `Failed` short of constructing a new interface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InterfaceState {
    /// Adapter setup in progress
    Initializing,
    /// Setup succeeded; readings may flow
    Operating,
    /// Setup failed; terminal for this interface instance
    Failed(String),
}

impl InterfaceState {
    /// Whether readings may currently be delivered
    pub fn is_operating(&self) -> bool {
        matches!(self, InterfaceState::Operating)
    }

    /// Failure reason, if the interface is failed
    pub fn failure_reason(&self) -> Option<&str> {
        match self {
            InterfaceState::Failed(reason) => Some(reason),
            _ => None,
        }
    }
}

impl fmt::Display for InterfaceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InterfaceState::Initializing => write!(f, "initializing"),
            InterfaceState::Operating => write!(f, "operating"),
            InterfaceState::Failed(reason) => write!(f, "failed ({})", reason),
        }
    }
}

/// Lifecycle cell shared between an adapter and its worker thread.
///
/// Holds the current state and publishes every transition on the event
/// channel exactly once, synchronously with the transition (the lock is
/// held across the send, so an observer can neither miss nor see a
/// duplicate of a transition).
pub struct StateCell {
    state: Mutex<InterfaceState>,
    events: EventSender,
}

impl StateCell {
    /// Create a cell in the `Initializing` state
    pub fn new(events: EventSender) -> Self {
        Self {
            state: Mutex::new(InterfaceState::Initializing),
            events,
        }
    }

    /// Current state (cloned snapshot)
    pub fn get(&self) -> InterfaceState {
        self.state.lock().clone()
    }

    /// Transition to `next` and publish the change.
    ///
    /// Re-entering the current state is a no-op (no duplicate
    /// notification). Transitions out of `Failed` are rejected; that state
    /// is terminal for the instance.
    pub fn transition(&self, next: InterfaceState) {
        let mut state = self.state.lock();
        if *state == next {
            return;
        }
        if let InterfaceState::Failed(reason) = &*state {
            warn!(
                "Ignoring transition to {} from terminal failed state ({})",
                next, reason
            );
            return;
        }

        match &next {
            InterfaceState::Failed(reason) => error!("Beacon interface failed: {}", reason),
            other => info!("Beacon interface state: {}", other),
        }

        *state = next.clone();
        // Send while holding the lock: the observer sees transitions in
        // order, exactly once each. A gone receiver just means nobody is
        // registered anymore.
        let _ = self.events.send(BeaconEvent::StateChanged(next));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::events::create_event_channel;

    #[test]
    fn test_starts_initializing() {
        let (tx, _rx) = create_event_channel();
        let cell = StateCell::new(tx);
        assert_eq!(cell.get(), InterfaceState::Initializing);
        assert!(!cell.get().is_operating());
    }

    #[test]
    fn test_transition_publishes_exactly_once() {
        let (tx, rx) = create_event_channel();
        let cell = StateCell::new(tx);

        cell.transition(InterfaceState::Operating);
        // Repeat is a no-op
        cell.transition(InterfaceState::Operating);

        assert_eq!(
            rx.try_recv(),
            Ok(BeaconEvent::StateChanged(InterfaceState::Operating))
        );
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_failed_is_terminal() {
        let (tx, rx) = create_event_channel();
        let cell = StateCell::new(tx);

        cell.transition(InterfaceState::Failed("no credentials".into()));
        cell.transition(InterfaceState::Operating);

        assert_eq!(
            cell.get().failure_reason(),
            Some("no credentials")
        );
        assert_eq!(
            rx.try_recv(),
            Ok(BeaconEvent::StateChanged(InterfaceState::Failed(
                "no credentials".into()
            )))
        );
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_transition_survives_dropped_receiver() {
        let (tx, rx) = create_event_channel();
        let cell = StateCell::new(tx);
        drop(rx);

        cell.transition(InterfaceState::Operating);
        assert!(cell.get().is_operating());
    }
}
