//! JSON remote procedure calls over a Unix domain socket.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                          RPC Server                          │
//! │                                                              │
//! │   ┌─────────────┐    ┌─────────────┐    ┌──────────────┐     │
//! │   │   Server    │───▶│  Transport  │───▶│  Dispatcher  │     │
//! │   │  (accept)   │    │ (frame loop)│    │              │     │
//! │   └─────────────┘    └─────────────┘    └──────────────┘     │
//! │                                            │        │        │
//! │                                            ▼        ▼        │
//! │                                    ┌──────────┐ ┌─────────┐  │
//! │                                    │ Methods  │ │ Coerce  │  │
//! │                                    └──────────┘ └─────────┘  │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! One connection is served at a time and one request per read. The
//! registry and dispatcher hold no mutable state, so repeating a request
//! gives the same response.

pub mod coerce;
pub mod context;
pub mod dispatch;
pub mod error;
pub mod methods;
pub mod protocol;
#[cfg(unix)]
pub mod server;
pub mod transport;

pub use context::ServerContext;
pub use dispatch::Dispatcher;
pub use error::{CoercionError, DispatchError, ProcedureError};
pub use methods::{Method, MethodRegistry, ReturnValue};
pub use protocol::{Request, Response};
#[cfg(unix)]
pub use server::RpcServer;
