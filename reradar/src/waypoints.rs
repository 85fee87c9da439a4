//! User-saved waypoints.
//!
//! Waypoints live in a JSON array in the user's configuration directory.
//! A missing or unreadable file is not an error: the store logs it and
//! returns no waypoints.

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Waypoints file name inside the user config directory.
pub const WAYPOINTS_FILE: &str = "waypoints.json";

/// A named point saved by the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// Reply envelope for the waypoints request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WaypointsResponse {
    pub waypoints: Vec<Waypoint>,
}

/// Read-only source of saved waypoints.
pub trait WaypointStore: Send + Sync {
    fn read_waypoints(&self) -> Vec<Waypoint>;
}

/// Default waypoints path: `<user config dir>/waypoints.json`.
pub fn default_waypoints_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(WAYPOINTS_FILE))
}

/// Waypoints read from a JSON file on every request.
#[derive(Debug, Clone)]
pub struct FileWaypointStore {
    path: Option<PathBuf>,
}

impl FileWaypointStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    /// Store at [`default_waypoints_path`].
    pub fn user_default() -> Self {
        Self {
            path: default_waypoints_path(),
        }
    }
}

impl WaypointStore for FileWaypointStore {
    fn read_waypoints(&self) -> Vec<Waypoint> {
        let Some(path) = &self.path else {
            warn!("No user config directory, no waypoints available");
            return Vec::new();
        };

        debug!(path = %path.display(), "Loading waypoints");
        let contents = match fs::read(path) {
            Ok(contents) => contents,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to read waypoints file");
                return Vec::new();
            }
        };

        match serde_json::from_slice::<Vec<Waypoint>>(&contents) {
            Ok(waypoints) => waypoints,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Invalid waypoints file");
                Vec::new()
            }
        }
    }
}
