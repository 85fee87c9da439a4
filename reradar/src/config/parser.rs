//! INI parsing logic for converting `Ini` → `ConfigFile`.
//!
//! This is the single place where INI key names are mapped to struct fields.

use std::path::PathBuf;

use ini::Ini;

use super::file::{ConfigFile, ConfigFileError};

fn invalid(section: &str, key: &str, value: &str, reason: &str) -> ConfigFileError {
    ConfigFileError::InvalidValue {
        section: section.to_string(),
        key: key.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Expands a leading `~` to the home directory.
fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}

fn non_empty(value: &str) -> Option<&str> {
    let value = value.trim();
    (!value.is_empty()).then_some(value)
}

/// Parse an `Ini` object into a `ConfigFile`.
///
/// Starts from `ConfigFile::default()` and overlays any values found in the INI.
pub(super) fn parse_ini(ini: &Ini) -> Result<ConfigFile, ConfigFileError> {
    let mut config = ConfigFile::default();

    // [provider] section
    if let Some(section) = ini.section(Some("provider")) {
        if let Some(v) = section.get("timeout") {
            config.provider.timeout = match v.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => secs,
                _ => {
                    return Err(invalid(
                        "provider",
                        "timeout",
                        v,
                        "expected a positive number of seconds",
                    ))
                }
            };
        }
        if let Some(v) = section.get("user_agent").and_then(non_empty) {
            config.provider.user_agent = v.to_string();
        }
    }

    // [datasets] section
    if let Some(section) = ini.section(Some("datasets")) {
        if let Some(v) = section.get("directory").and_then(non_empty) {
            config.datasets.directory = Some(expand_tilde(v));
        }
    }

    // [waypoints] section
    if let Some(section) = ini.section(Some("waypoints")) {
        if let Some(v) = section.get("file").and_then(non_empty) {
            config.waypoints.file = Some(expand_tilde(v));
        }
    }

    // [session] section
    if let Some(section) = ini.section(Some("session")) {
        if let Some(v) = section.get("queue_capacity") {
            config.session.queue_capacity = match v.trim().parse::<usize>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(invalid(
                        "session",
                        "queue_capacity",
                        v,
                        "expected a positive integer",
                    ))
                }
            };
        }
    }

    // [logging] section
    if let Some(section) = ini.section(Some("logging")) {
        if let Some(v) = section.get("directory").and_then(non_empty) {
            config.logging.directory = expand_tilde(v);
        }
        if let Some(v) = section.get("file").and_then(non_empty) {
            config.logging.file = v.to_string();
        }
    }

    Ok(config)
}
