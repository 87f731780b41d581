//! Unix socket listener.
//!
//! Connections are served strictly one at a time: the next `accept` only
//! happens once the current connection's request loop has finished.

use std::future::Future;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use tokio::net::{UnixListener, UnixSocket};
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::ServerError;
use crate::rpc::context::ServerContext;
use crate::rpc::transport::serve_connection;

/// Pause after a failed `accept` before trying again.
const ACCEPT_ERROR_BACKOFF: Duration = Duration::from_millis(150);

/// Pending connections the kernel queues while one is being served.
const LISTEN_BACKLOG: u32 = 1;

/// A bound RPC server.
pub struct RpcServer {
    listener: UnixListener,
    path: PathBuf,
    context: ServerContext,
}

impl RpcServer {
    /// Binds the socket named in the configuration.
    ///
    /// Must be called from within a Tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns an error if a stale socket file cannot be removed or the
    /// socket cannot be bound.
    pub fn bind(config: &Config) -> Result<Self, ServerError> {
        Self::bind_with_context(&config.server_address, ServerContext::from_config(config))
    }

    /// Binds `path` with an explicit context.
    ///
    /// # Errors
    ///
    /// Returns an error if a stale socket file cannot be removed or the
    /// socket cannot be bound.
    pub fn bind_with_context(path: &Path, context: ServerContext) -> Result<Self, ServerError> {
        remove_stale_socket(path)?;

        let listener = listen(path).map_err(|source| ServerError::Bind {
            path: path.to_path_buf(),
            source,
        })?;

        info!(path = %path.display(), backlog = LISTEN_BACKLOG, "Listening");

        Ok(Self {
            listener,
            path: path.to_path_buf(),
            context,
        })
    }

    /// Path of the bound socket.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Runs the accept loop until SIGINT or SIGTERM.
    ///
    /// # Errors
    ///
    /// Returns an error if the signal handlers cannot be installed.
    pub async fn run(self) -> Result<(), ServerError> {
        use tokio::signal::unix::{signal, SignalKind};

        let mut sigint = signal(SignalKind::interrupt()).map_err(ServerError::Signal)?;
        let mut sigterm = signal(SignalKind::terminate()).map_err(ServerError::Signal)?;

        self.run_until(async move {
            tokio::select! {
                _ = sigint.recv() => info!("Received SIGINT, initiating graceful shutdown"),
                _ = sigterm.recv() => info!("Received SIGTERM, initiating graceful shutdown"),
            }
        })
        .await;

        Ok(())
    }

    /// Runs the accept loop until `shutdown` completes.
    ///
    /// A connection in progress is dropped when shutdown fires. The socket
    /// file is removed before returning.
    pub async fn run_until<F>(self, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);

        loop {
            let stream = tokio::select! {
                () = &mut shutdown => break,
                accepted = self.listener.accept() => match accepted {
                    Ok((stream, _)) => stream,
                    Err(e) => {
                        warn!(error = %e, "Failed to accept connection");
                        tokio::time::sleep(ACCEPT_ERROR_BACKOFF).await;
                        continue;
                    }
                },
            };

            debug!("Client connected");

            tokio::select! {
                () = &mut shutdown => break,
                result = serve_connection(stream, &self.context) => match result {
                    Ok(()) => debug!("Client disconnected"),
                    Err(e) => warn!(error = %e, cause = ?std::error::Error::source(&e), "Connection closed"),
                },
            }
        }

        self.cleanup();
    }

    fn cleanup(&self) {
        match std::fs::remove_file(&self.path) {
            Ok(()) => debug!(path = %self.path.display(), "Removed socket file"),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => warn!(path = %self.path.display(), error = %e, "Failed to remove socket file"),
        }
    }
}

/// Removes a socket file left over from an earlier run.
fn remove_stale_socket(path: &Path) -> Result<(), ServerError> {
    match std::fs::remove_file(path) {
        Ok(()) => {
            debug!(path = %path.display(), "Removed stale socket file");
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(source) => Err(ServerError::StaleSocket {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Binds a stream socket at `path` and listens with [`LISTEN_BACKLOG`].
fn listen(path: &Path) -> io::Result<UnixListener> {
    let socket = UnixSocket::new_stream()?;
    socket.bind(path)?;
    socket.listen(LISTEN_BACKLOG)
}
