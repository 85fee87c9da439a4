//! Application error types.

use std::fmt;

use crate::config::ConfigFileError;
use crate::provider::ProviderError;
use crate::session::SessionError;
use crate::transport::TransportError;

/// Errors that can occur during application lifecycle.
#[derive(Debug)]
pub enum AppError {
    /// Failed to load the configuration file.
    Config(ConfigFileError),

    /// Failed to create the HTTP client.
    ProviderCreation(ProviderError),

    /// Failed to connect to the host.
    Connect(TransportError),

    /// The session ended with an error.
    Session(SessionError),

    /// Failed to create the Tokio runtime.
    RuntimeCreation(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(e) => write!(f, "Configuration error: {}", e),
            AppError::ProviderCreation(e) => {
                write!(f, "Failed to create flight provider: {}", e)
            }
            AppError::Connect(e) => write!(f, "Failed to connect to host: {}", e),
            AppError::Session(e) => write!(f, "Session failed: {}", e),
            AppError::RuntimeCreation(msg) => {
                write!(f, "Failed to create Tokio runtime: {}", msg)
            }
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(e) => Some(e),
            AppError::ProviderCreation(e) => Some(e),
            AppError::Connect(e) => Some(e),
            AppError::Session(e) => Some(e),
            AppError::RuntimeCreation(_) => None,
        }
    }
}

impl From<ConfigFileError> for AppError {
    fn from(e: ConfigFileError) -> Self {
        AppError::Config(e)
    }
}

impl From<ProviderError> for AppError {
    fn from(e: ProviderError) -> Self {
        AppError::ProviderCreation(e)
    }
}

impl From<SessionError> for AppError {
    fn from(e: SessionError) -> Self {
        AppError::Session(e)
    }
}
