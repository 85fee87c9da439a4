//! reRadar - live flight enrichment backend
//!
//! This library receives typed requests from a host front end, fetches live
//! flight telemetry, joins it against bundled aircraft type and airline
//! datasets, and replies with display-ready JSON.

pub mod app;
pub mod config;
pub mod dispatch;
pub mod enrich;
pub mod fallback;
pub mod geo;
pub mod logging;
pub mod protocol;
pub mod provider;
pub mod reference;
pub mod session;
pub mod transport;
pub mod waypoints;

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
