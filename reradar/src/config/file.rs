//! Configuration file handling for `<config dir>/reradar/config.ini`.
//!
//! Every key is optional; anything not set keeps its default.

use std::path::{Path, PathBuf};

use ini::Ini;
use thiserror::Error;

use crate::provider::{DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT};
use crate::session::DEFAULT_QUEUE_CAPACITY;

/// Application directory name under the user config directory.
pub const APP_DIR_NAME: &str = "reradar";

/// Config file name.
pub const CONFIG_FILE_NAME: &str = "config.ini";

/// Default log file name.
pub const DEFAULT_LOG_FILE: &str = "reradar.log";

/// Configuration file errors.
#[derive(Debug, Error)]
pub enum ConfigFileError {
    /// Failed to read config file
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] ini::Error),

    /// Invalid configuration value
    #[error("Invalid configuration: {section}.{key} = '{value}' - {reason}")]
    InvalidValue {
        section: String,
        key: String,
        value: String,
        reason: String,
    },
}

/// `[provider]` settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderSettings {
    /// HTTP timeout in seconds.
    pub timeout: u64,
    pub user_agent: String,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// `[datasets]` settings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DatasetSettings {
    /// Directory holding replacement reference datasets. `None` uses the
    /// datasets compiled into the binary.
    pub directory: Option<PathBuf>,
}

/// `[waypoints]` settings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WaypointSettings {
    /// Waypoints file. `None` uses `<user config dir>/waypoints.json`.
    pub file: Option<PathBuf>,
}

/// `[session]` settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSettings {
    pub queue_capacity: usize,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
        }
    }
}

/// `[logging]` settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingSettings {
    pub directory: PathBuf,
    pub file: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            directory: default_log_directory(),
            file: DEFAULT_LOG_FILE.to_string(),
        }
    }
}

/// Parsed configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigFile {
    pub provider: ProviderSettings,
    pub datasets: DatasetSettings,
    pub waypoints: WaypointSettings,
    pub session: SessionSettings,
    pub logging: LoggingSettings,
}

impl ConfigFile {
    /// Load configuration from the default path.
    pub fn load() -> Result<Self, ConfigFileError> {
        Self::load_from(&config_file_path())
    }

    /// Load configuration from a specific path.
    ///
    /// If the file doesn't exist, returns defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigFileError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let ini = Ini::load_from_file(path)?;
        super::parser::parse_ini(&ini)
    }

    /// Parse configuration from INI text.
    pub fn parse(contents: &str) -> Result<Self, ConfigFileError> {
        let ini = Ini::load_from_str(contents).map_err(ini::Error::Parse)?;
        super::parser::parse_ini(&ini)
    }
}

/// Path to the config directory (`<user config dir>/reradar`).
pub fn config_directory() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR_NAME)
}

/// Path to the config file.
pub fn config_file_path() -> PathBuf {
    config_directory().join(CONFIG_FILE_NAME)
}

/// Default log directory (`<user data dir>/reradar/logs`).
pub fn default_log_directory() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR_NAME)
        .join("logs")
}
