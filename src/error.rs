//! Error types for sockrpc.
//!
//! Request-level errors (unknown methods, coercion failures, procedure
//! faults) live in [`crate::rpc::error`]; they are turned into error
//! responses and never reach this module's types.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur during configuration operations.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Configuration file could not be read.
    #[error("failed to read configuration file: {path}")]
    ReadError {
        /// Path to the configuration file.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Configuration file could not be parsed.
    #[error("failed to parse configuration file: {path}")]
    ParseError {
        /// Path to the configuration file.
        path: PathBuf,
        /// The underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// Configuration file not found.
    #[error("configuration file not found: {path}")]
    NotFound {
        /// Path where the configuration file was expected.
        path: PathBuf,
    },

    /// Configuration validation failed.
    #[error("configuration validation failed: {message}")]
    ValidationError {
        /// Description of the validation failure.
        message: String,
    },
}

/// Errors that stop the listener itself.
#[derive(Error, Debug)]
pub enum ServerError {
    /// A stale socket file exists but could not be removed.
    #[error("failed to remove stale socket file: {path}")]
    StaleSocket {
        /// Path of the socket file.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Binding the Unix socket failed.
    #[error("failed to bind socket: {path}")]
    Bind {
        /// Path of the socket file.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Installing a shutdown signal handler failed.
    #[error("failed to install signal handler")]
    Signal(#[source] std::io::Error),
}

/// Errors that end a single client connection.
///
/// These never stop the listener; the accept loop logs them and moves on.
#[derive(Error, Debug)]
pub enum ConnectionError {
    /// Reading from or writing to the socket failed.
    #[error("connection I/O failed")]
    Io(#[from] std::io::Error),

    /// The received frame was not a JSON document.
    #[error("malformed request frame")]
    FrameDecode(#[source] serde_json::Error),

    /// The response could not be encoded.
    #[error("failed to encode response")]
    Encode(#[source] serde_json::Error),
}
