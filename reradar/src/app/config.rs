//! Application configuration for ReradarApp.
//!
//! This module defines `AppConfig` which combines everything needed to
//! bootstrap the backend: provider settings, reference dataset location,
//! waypoint file and session settings.

use std::path::PathBuf;

use crate::config::{ConfigFile, ProviderSettings};
use crate::provider::FeedEndpoints;
use crate::session::SessionConfig;

/// Application configuration combining all component configs.
///
/// This is the top-level configuration passed to `ReradarApp::build()`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AppConfig {
    /// HTTP settings for the live feed.
    pub provider: ProviderSettings,

    /// Live feed endpoints.
    pub endpoints: FeedEndpoints,

    /// Directory with replacement datasets; `None` uses the embedded ones.
    pub datasets_dir: Option<PathBuf>,

    /// Waypoints file; `None` uses the user config directory.
    pub waypoints_file: Option<PathBuf>,

    /// Session settings.
    pub session: SessionConfig,
}

impl AppConfig {
    /// Create application config from the configuration file.
    ///
    /// Keeps the file-to-app translation in one place rather than in CLI code.
    pub fn from_config_file(config: &ConfigFile) -> Self {
        Self {
            provider: config.provider.clone(),
            endpoints: FeedEndpoints::default(),
            datasets_dir: config.datasets.directory.clone(),
            waypoints_file: config.waypoints.file.clone(),
            session: SessionConfig {
                queue_capacity: config.session.queue_capacity,
            },
        }
    }

    /// Use datasets from a directory instead of the embedded copies.
    pub fn with_datasets_dir(mut self, directory: PathBuf) -> Self {
        self.datasets_dir = Some(directory);
        self
    }

    /// Read waypoints from a specific file.
    pub fn with_waypoints_file(mut self, file: PathBuf) -> Self {
        self.waypoints_file = Some(file);
        self
    }

    /// Point the provider at different endpoints.
    pub fn with_endpoints(mut self, endpoints: FeedEndpoints) -> Self {
        self.endpoints = endpoints;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::DEFAULT_QUEUE_CAPACITY;

    #[test]
    fn test_app_config_default() {
        let config = AppConfig::default();
        assert!(config.datasets_dir.is_none());
        assert!(config.waypoints_file.is_none());
        assert_eq!(config.session.queue_capacity, DEFAULT_QUEUE_CAPACITY);
        assert_eq!(config.endpoints, FeedEndpoints::default());
    }

    #[test]
    fn test_from_config_file() {
        let file = ConfigFile::parse(
            "[provider]\ntimeout = 7\n[datasets]\ndirectory = /data\n[session]\nqueue_capacity = 4\n",
        )
        .unwrap();

        let config = AppConfig::from_config_file(&file);
        assert_eq!(config.provider.timeout, 7);
        assert_eq!(config.datasets_dir, Some(PathBuf::from("/data")));
        assert_eq!(config.session.queue_capacity, 4);
    }

    #[test]
    fn test_builder_overrides() {
        let config = AppConfig::default()
            .with_datasets_dir(PathBuf::from("/override"))
            .with_waypoints_file(PathBuf::from("/wp.json"));

        assert_eq!(config.datasets_dir, Some(PathBuf::from("/override")));
        assert_eq!(config.waypoints_file, Some(PathBuf::from("/wp.json")));
    }
}
