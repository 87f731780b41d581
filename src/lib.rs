//! sockrpc: a minimal JSON remote procedure call server over a Unix socket.
//!
//! A client sends `{"method", "params", "param_types", "id"}`; the server
//! coerces the textual parameters to their declared types, runs the named
//! procedure and replies with `{"results", "result_type", "id"}` or
//! `{"error", "id"}`.
//!
//! # Modules
//!
//! - [`config`] — Configuration loading and validation
//! - [`error`] — Configuration, server and connection errors
//! - [`rpc`] — Protocol, dispatch, procedures and the socket server

pub mod config;
pub mod error;
pub mod rpc;
