//! DishaNav - Beacon-driven route tracking over a venue graph
//!
//! Turns the asynchronous, noisy beacon readings delivered by a
//! [`dipa_io`] adapter into a reliable stream of route progress updates
//! against a [`marga_graph`] venue topology.
//!
//! ## Architecture
//!
//! - [`route`]: The [`route::RouteTracker`] single-writer state machine:
//!   strongest-signal node resolution, forward-only progress, arrival
//!   latch, loss-of-signal watchdog
//! - [`threads`]: The tracker worker, sole consumer of the beacon event
//!   channel, preserving delivery order
//! - [`shared`]: State shared between the worker and the daemon main loop
//! - [`venue`]: Built-in demo venue standing in for the external venue
//!   data provider
//! - [`config`]: TOML configuration for the daemon
//!
//! The demo daemon (`disha-nav` binary) wires all of it together: it
//! validates venue connectivity, plans a route, and follows the mock
//! adapter's scripted walk to arrival.

pub mod config;
pub mod error;
pub mod route;
pub mod shared;
pub mod threads;
pub mod venue;

pub use config::DishaConfig;
pub use error::{DishaError, Result};
pub use route::{RouteEvent, RouteProgress, RouteTracker, TrackerConfig};
pub use shared::SharedNavState;
pub use threads::{create_route_channel, TrackerThread};
pub use venue::{demo_interface_config, demo_venue, DemoVenue};
