//! User configuration.
//!
//! Settings are read from an INI file. Command-line flags override them in
//! the CLI; this module only knows about the file.

mod file;
mod parser;

pub use file::{
    config_directory, config_file_path, default_log_directory, ConfigFile, ConfigFileError,
    DatasetSettings, LoggingSettings, ProviderSettings, SessionSettings, WaypointSettings,
    APP_DIR_NAME, CONFIG_FILE_NAME, DEFAULT_LOG_FILE,
};
