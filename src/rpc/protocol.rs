//! Wire message types.
//!
//! # Message Shapes
//!
//! - **Request**: `{"method": string, "params": [string], "param_types": [string], "id": any}`
//! - **Success**: `{"results": any, "result_type": string, "id": any}`
//! - **Error**: `{"error": string, "id": any}`
//!
//! The `id` is opaque: any JSON value the client sends comes back unchanged.
//!
//! # Framing
//!
//! One JSON document per read. There is no length prefix and no delimiter,
//! so a request larger than the read buffer, or two requests sent before the
//! first response arrives, cannot be decoded.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::rpc::error::DispatchError;
use crate::rpc::methods::ReturnValue;

/// A decoded method invocation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Request {
    /// Name of the procedure to call.
    pub method: String,

    /// Raw textual parameters.
    #[serde(default)]
    pub params: Vec<String>,

    /// Declared type of each parameter, paired positionally with `params`.
    #[serde(default, alias = "params_types")]
    pub param_types: Vec<String>,

    /// Client correlation token, echoed in the response.
    #[serde(default)]
    pub id: Value,
}

impl Request {
    /// Creates a request.
    pub fn new<P, T>(method: impl Into<String>, params: P, param_types: T, id: Value) -> Self
    where
        P: IntoIterator,
        P::Item: Into<String>,
        T: IntoIterator,
        T::Item: Into<String>,
    {
        Self {
            method: method.into(),
            params: params.into_iter().map(Into::into).collect(),
            param_types: param_types.into_iter().map(Into::into).collect(),
            id,
        }
    }

    /// Number of parameters that have a declared type.
    #[must_use]
    pub fn paired_len(&self) -> usize {
        self.params.len().min(self.param_types.len())
    }
}

/// A reply to one request. Exactly one shape is ever produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Response {
    /// The procedure ran and returned a value.
    Success {
        /// The returned value.
        results: ReturnValue,
        /// Kind of the returned value.
        result_type: &'static str,
        /// Echoed correlation token.
        id: Value,
    },
    /// The request failed.
    Error {
        /// Client-visible error message.
        error: String,
        /// Echoed correlation token.
        id: Value,
    },
}

impl Response {
    /// Creates a success response.
    #[must_use]
    pub fn success(results: ReturnValue, id: Value) -> Self {
        Self::Success {
            result_type: results.type_name(),
            results,
            id,
        }
    }

    /// Creates an error response.
    #[must_use]
    pub fn error(error: impl Into<String>, id: Value) -> Self {
        Self::Error {
            error: error.into(),
            id,
        }
    }

    /// Creates an error response from a dispatch error.
    #[must_use]
    pub fn from_error(err: &DispatchError, id: Value) -> Self {
        Self::error(err.to_string(), id)
    }

    /// Returns the echoed correlation token.
    #[must_use]
    pub const fn id(&self) -> &Value {
        match self {
            Self::Success { id, .. } | Self::Error { id, .. } => id,
        }
    }

    /// Returns `true` for an error response.
    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self, Self::Error { .. })
    }
}

/// Result of decoding one frame that held valid JSON.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Incoming {
    /// A well-formed request.
    Request(Request),
    /// Valid JSON that is not a request; carries the error and whatever `id`
    /// could be recovered.
    Invalid {
        /// What was wrong with the document.
        error: DispatchError,
        /// The document's `id` field, or `null`.
        id: Value,
    },
}

/// Decodes one frame.
///
/// # Errors
///
/// Returns the JSON error if the bytes are not a JSON document. A document
/// that parses but is not a request is reported as [`Incoming::Invalid`].
pub fn decode_frame(frame: &[u8]) -> Result<Incoming, serde_json::Error> {
    let value: Value = serde_json::from_slice(frame)?;
    let id = value.get("id").cloned().unwrap_or(Value::Null);

    Ok(match serde_json::from_value::<Request>(value) {
        Ok(request) => Incoming::Request(request),
        Err(e) => Incoming::Invalid {
            error: DispatchError::InvalidRequest(e.to_string()),
            id,
        },
    })
}
