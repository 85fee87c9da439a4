//! Application bootstrap and lifecycle management.
//!
//! `ReradarApp` builds every collaborator the dispatcher needs from an
//! [`AppConfig`] and serves host sessions.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                         ReradarApp                            │
//! │                                                               │
//! │  ReferenceStore ──► EnrichmentEngine ──┐                      │
//! │  Flightradar24Provider ────────────────┼──► Dispatcher        │
//! │  FileWaypointStore ────────────────────┘        │             │
//! │                                                 ▼             │
//! │  socket ──► transport ──► Session (queue + blocking dispatch) │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```ignore
//! use reradar::app::{AppConfig, ReradarApp};
//!
//! let app = ReradarApp::build(AppConfig::default())?;
//! app.run(socket_path, shutdown).await?;
//! ```

mod bootstrap;
mod config;
mod error;

pub use bootstrap::ReradarApp;
pub use config::AppConfig;
pub use error::AppError;
