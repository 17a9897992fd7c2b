//! DipaIO - Beacon interface abstraction for indoor positioning
//!
//! This library is the boundary between raw beacon hardware (or a vendor
//! ranging SDK) and the navigation stack. Adapters implement a small
//! capability set behind the [`BeaconAdapter`] trait and publish typed
//! events onto a single-consumer channel; the consumer drains the channel
//! in delivery order, which serializes every notification for an interface
//! instance.
//!
//! ## Lifecycle
//!
//! An adapter starts in `Initializing` and moves exactly once to either
//! `Operating` (readings may flow) or `Failed(reason)` (terminal; build a
//! new adapter to retry). Each transition is published as a
//! [`BeaconEvent::StateChanged`] exactly once, before any reading produced
//! after it.
//!
//! ## Features
//!
//! The in-tree [`adapters::MockAdapter`] is a deterministic, scripted stub
//! for hardware-free development and tests; vendor SDK adapters slot in
//! through [`adapters::create_adapter`].

pub mod adapters;
pub mod config;
pub mod core;
pub mod error;

pub use adapters::create_adapter;
pub use config::DipaConfig;
pub use core::adapter::{BeaconAdapter, ScanCompletion};
pub use core::events::{create_event_channel, BeaconEvent, EventReceiver, EventSender};
pub use core::state::InterfaceState;
pub use core::types::{BeaconId, BeaconReading, Proximity};
pub use error::{Error, Result};
