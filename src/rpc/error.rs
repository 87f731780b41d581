//! Error types for request dispatch.
//!
//! Every error in this module is recovered by the dispatcher and turned into
//! an error response; none of them closes the connection.

use thiserror::Error;

/// Message sent to the client for any internal fault.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Errors produced while coercing textual parameters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoercionError {
    /// The declared type tag is not one of `int`, `float`, `str`, `list`.
    #[error("Unsupported type: {tag}")]
    UnsupportedType {
        /// The offending type tag.
        tag: String,
    },

    /// The text does not parse as its declared type.
    #[error("Invalid value '{value}' for type {tag}")]
    InvalidValue {
        /// The raw parameter text.
        value: String,
        /// The declared type tag.
        tag: String,
    },
}

impl CoercionError {
    /// Creates an invalid value error.
    pub fn invalid_value(value: impl Into<String>, tag: impl Into<String>) -> Self {
        Self::InvalidValue {
            value: value.into(),
            tag: tag.into(),
        }
    }
}

/// Errors raised by a procedure while it runs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProcedureError {
    /// The argument is of the right kind but outside the procedure's domain.
    ///
    /// The message is safe to show to the client.
    #[error("{0}")]
    InvalidArgument(String),

    /// An argument's kind does not match the procedure's signature.
    #[error("argument {index} of {method}: expected {expected}, got {actual}")]
    TypeMismatch {
        /// Wire name of the procedure.
        method: &'static str,
        /// Zero-based argument position.
        index: usize,
        /// Expected argument kind.
        expected: &'static str,
        /// Kind actually received.
        actual: &'static str,
    },

    /// Arithmetic fault, such as division by zero or a non-real result.
    #[error("arithmetic error in {method}: {message}")]
    Arithmetic {
        /// Wire name of the procedure.
        method: &'static str,
        /// Description of the fault.
        message: String,
    },
}

/// Errors the dispatcher reports back to the client.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    /// No procedure is registered under the requested name.
    #[error("Method not found")]
    MethodNotFound,

    /// The number of paired parameters does not match the procedure's arity.
    #[error("Arity mismatch: {method} expects {expected} argument(s), got {actual}")]
    ArityMismatch {
        /// Wire name of the procedure.
        method: &'static str,
        /// Declared number of parameters.
        expected: usize,
        /// Number of parameters supplied.
        actual: usize,
    },

    /// Parameter coercion failed.
    #[error(transparent)]
    Coercion(#[from] CoercionError),

    /// The procedure rejected an argument value.
    #[error("{0}")]
    InvalidArgument(String),

    /// Any other fault during invocation. The detail is for logs only.
    #[error("Internal server error")]
    Internal(String),

    /// The frame was valid JSON but not a request object.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl From<ProcedureError> for DispatchError {
    fn from(err: ProcedureError) -> Self {
        match err {
            ProcedureError::InvalidArgument(message) => Self::InvalidArgument(message),
            other => Self::Internal(other.to_string()),
        }
    }
}
