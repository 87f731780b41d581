//! Shared, read-only server state.

use crate::config::{Config, DEFAULT_BUFFER_SIZE};
use crate::rpc::dispatch::Dispatcher;
use crate::rpc::methods::MethodRegistry;

/// State built once at startup and lent to every connection.
#[derive(Debug, Clone)]
pub struct ServerContext {
    registry: MethodRegistry,
    buffer_size: usize,
}

impl ServerContext {
    /// Creates a context with the built-in procedures.
    #[must_use]
    pub fn new(buffer_size: usize) -> Self {
        Self {
            registry: MethodRegistry::new(),
            buffer_size,
        }
    }

    /// Creates a context from a loaded configuration.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.buffer_size)
    }

    /// Size of the buffer used for each frame read.
    #[must_use]
    pub const fn buffer_size(&self) -> usize {
        self.buffer_size
    }

    /// A dispatcher borrowing this context's registry.
    #[must_use]
    pub const fn dispatcher(&self) -> Dispatcher<'_> {
        Dispatcher::new(&self.registry)
    }
}

impl Default for ServerContext {
    fn default() -> Self {
        Self::new(DEFAULT_BUFFER_SIZE)
    }
}
