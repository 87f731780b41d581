//! Request dispatch: lookup, arity check, coercion, invocation.

use serde_json::Value;
use tracing::{debug, warn};

use crate::rpc::coerce::coerce_params;
use crate::rpc::error::DispatchError;
use crate::rpc::methods::{MethodRegistry, ReturnValue};
use crate::rpc::protocol::{Request, Response};

/// Stateless request handler over a read-only registry.
#[derive(Debug, Clone, Copy)]
pub struct Dispatcher<'a> {
    registry: &'a MethodRegistry,
}

impl<'a> Dispatcher<'a> {
    /// Creates a dispatcher over the given registry.
    #[must_use]
    pub const fn new(registry: &'a MethodRegistry) -> Self {
        Self { registry }
    }

    /// Handles one request and shapes the response.
    ///
    /// Never fails: every error becomes an error response carrying the
    /// request's `id`.
    #[must_use]
    pub fn handle(&self, request: &Request) -> Response {
        match self.execute(request) {
            Ok(results) => {
                debug!(method = %request.method, result_type = results.type_name(), "Request succeeded");
                Response::success(results, request.id.clone())
            }
            Err(err) => {
                Self::log_failure(request, &err);
                Response::from_error(&err, request.id.clone())
            }
        }
    }

    fn execute(&self, request: &Request) -> Result<ReturnValue, DispatchError> {
        let method = self
            .registry
            .resolve(&request.method)
            .ok_or(DispatchError::MethodNotFound)?;

        let supplied = request.paired_len();
        if supplied != method.arity() {
            return Err(DispatchError::ArityMismatch {
                method: method.name(),
                expected: method.arity(),
                actual: supplied,
            });
        }

        let args = coerce_params(&request.params, &request.param_types)?;

        Ok(method.invoke(&args)?)
    }

    fn log_failure(request: &Request, err: &DispatchError) {
        match err {
            DispatchError::Internal(detail) => {
                warn!(method = %request.method, id = %request.id, detail = %detail, "Procedure fault");
            }
            _ => debug!(method = %request.method, error = %err, "Request rejected"),
        }
    }
}

/// Convenience for error responses built outside the dispatcher.
#[must_use]
pub fn reject(err: &DispatchError, id: Value) -> Response {
    debug!(error = %err, "Request rejected before dispatch");
    Response::from_error(err, id)
}
