//! CLI runner for common setup and operations.
//!
//! Encapsulates config loading, logging initialization and the session
//! runtime so `main` stays a thin argument parser.

use std::path::{Path, PathBuf};

use reradar::app::{AppConfig, AppError, ReradarApp};
use reradar::config::{ConfigFile, LoggingSettings};
use reradar::logging::{init_logging, LoggingGuard};
use reradar::session::SessionEnd;
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::error::CliError;

/// Command-line overrides applied on top of the config file.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub config: Option<PathBuf>,
    pub log_dir: Option<PathBuf>,
    pub datasets: Option<PathBuf>,
    pub waypoints: Option<PathBuf>,
}

/// Runner that manages CLI lifecycle.
pub struct CliRunner {
    /// Logging guard - keeps logging active while runner exists
    #[allow(dead_code)]
    logging_guard: LoggingGuard,
    app_config: AppConfig,
}

impl CliRunner {
    /// Load config, apply overrides and initialize logging.
    pub fn new(overrides: &Overrides) -> Result<Self, CliError> {
        let config = match &overrides.config {
            Some(path) => ConfigFile::load_from(path)?,
            None => ConfigFile::load()?,
        };

        let logging = log_settings(&config.logging, overrides.log_dir.as_deref());
        let logging_guard = init_logging(&logging.directory, &logging.file)
            .map_err(|e| CliError::LoggingInit(e.to_string()))?;

        let mut app_config = AppConfig::from_config_file(&config);
        if let Some(dir) = &overrides.datasets {
            app_config = app_config.with_datasets_dir(dir.clone());
        }
        if let Some(file) = &overrides.waypoints {
            app_config = app_config.with_waypoints_file(file.clone());
        }

        Ok(Self {
            logging_guard,
            app_config,
        })
    }

    /// Serve the host on `socket` until it terminates, disconnects, or Ctrl-C.
    pub fn run(self, socket: &Path) -> Result<SessionEnd, CliError> {
        info!("reRadar v{}", reradar::VERSION);

        let shutdown = CancellationToken::new();
        let handler_token = shutdown.clone();
        ctrlc::set_handler(move || handler_token.cancel())
            .map_err(|e| CliError::SignalHandler(e.to_string()))?;

        // The blocking HTTP client must be created and dropped outside the
        // async runtime.
        let app = ReradarApp::build(self.app_config)?;

        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
            .map_err(|e| AppError::RuntimeCreation(e.to_string()))?;

        let end = runtime.block_on(app.run(socket, shutdown))?;
        drop(runtime);
        drop(app);

        info!(?end, "reRadar exiting");
        Ok(end)
    }
}

fn log_settings(settings: &LoggingSettings, log_dir: Option<&Path>) -> LoggingSettings {
    let mut settings = settings.clone();
    if let Some(dir) = log_dir {
        settings.directory = dir.to_path_buf();
    }
    settings
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_dir_override() {
        let settings = LoggingSettings::default();
        let overridden = log_settings(&settings, Some(Path::new("/tmp/reradar-logs")));
        assert_eq!(overridden.directory, PathBuf::from("/tmp/reradar-logs"));
        assert_eq!(overridden.file, settings.file);
    }

    #[test]
    fn test_no_override_keeps_settings() {
        let settings = LoggingSettings::default();
        assert_eq!(log_settings(&settings, None), settings);
    }
}
