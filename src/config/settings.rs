//! Configuration structures for deserialisation.
//!
//! These structures map directly to the JSON configuration file format.

use std::path::PathBuf;

use serde::Deserialize;

use crate::error::ConfigError;

/// Default size of the per-read request buffer, in bytes.
pub const DEFAULT_BUFFER_SIZE: usize = 1024;

/// Upper bound accepted for `buffer_size`.
pub const MAX_BUFFER_SIZE: usize = 1024 * 1024;

/// Root configuration structure.
///
/// This is the top-level structure that matches the JSON config file.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Optional JSON schema reference (ignored during parsing).
    #[serde(rename = "$schema", default)]
    _schema: Option<String>,

    /// Optional comment field (ignored during parsing).
    #[serde(rename = "_comment", default)]
    _comment: Option<String>,

    /// Filesystem path of the Unix socket to listen on.
    pub server_address: PathBuf,

    /// Size of the buffer used for each request read.
    ///
    /// A request must fit in a single read of this size.
    #[serde(default = "default_buffer_size")]
    pub buffer_size: usize,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Creates a configuration for the given socket path with default settings.
    #[must_use]
    pub fn new(server_address: impl Into<PathBuf>) -> Self {
        Self {
            _schema: None,
            _comment: None,
            server_address: server_address.into(),
            buffer_size: DEFAULT_BUFFER_SIZE,
            logging: LoggingConfig::default(),
        }
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any validation checks fail.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server_address.as_os_str().is_empty() {
            return Err(ConfigError::ValidationError {
                message: "server_address must not be empty".to_string(),
            });
        }

        if self.buffer_size == 0 || self.buffer_size > MAX_BUFFER_SIZE {
            return Err(ConfigError::ValidationError {
                message: format!(
                    "Invalid buffer_size {}. Must be between 1 and {MAX_BUFFER_SIZE}",
                    self.buffer_size
                ),
            });
        }

        Ok(())
    }
}

const fn default_buffer_size() -> usize {
    DEFAULT_BUFFER_SIZE
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}
