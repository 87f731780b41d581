//! Frame transport and the per-connection request loop.
//!
//! Each read of up to `buffer_size` bytes is treated as one complete JSON
//! request; each response is written in full before the next read:
//!
//! ```text
//! AWAIT_FRAME ──▶ DECODE ──▶ DISPATCH ──▶ SEND ──┐
//!      ▲                                         │
//!      └─────────────────────────────────────────┘
//! ```
//!
//! The loop ends on an empty read (peer closed), on an I/O error, or on a
//! frame that is not JSON. Messages split across reads are not reassembled.

use std::io;

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, trace};

use crate::error::ConnectionError;
use crate::rpc::context::ServerContext;
use crate::rpc::dispatch::reject;
use crate::rpc::protocol::{decode_frame, Incoming, Response};

/// Reads request frames from and writes responses to a byte stream.
pub struct FrameTransport<S> {
    stream: S,
    buffer: Vec<u8>,
}

impl<S> FrameTransport<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    /// Wraps a stream, reading at most `buffer_size` bytes per frame.
    #[must_use]
    pub fn new(stream: S, buffer_size: usize) -> Self {
        Self {
            stream,
            buffer: vec![0; buffer_size],
        }
    }

    /// Reads the next frame.
    ///
    /// Returns `None` if the peer closed the connection.
    ///
    /// # Errors
    ///
    /// Returns an error if reading from the stream fails.
    pub async fn read_frame(&mut self) -> io::Result<Option<&[u8]>> {
        let bytes_read = self.stream.read(&mut self.buffer).await?;

        if bytes_read == 0 {
            return Ok(None);
        }

        if bytes_read == self.buffer.len() {
            debug!(
                buffer_size = self.buffer.len(),
                "Frame filled the read buffer; a larger request would be truncated"
            );
        }

        Ok(Some(&self.buffer[..bytes_read]))
    }

    /// Encodes a response and writes all of it to the stream.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding or writing fails.
    pub async fn write_response(&mut self, response: &Response) -> Result<(), ConnectionError> {
        let json = serde_json::to_vec(response).map_err(ConnectionError::Encode)?;

        self.stream.write_all(&json).await?;
        self.stream.flush().await?;

        Ok(())
    }
}

/// Serves requests on one connection until the peer closes it.
///
/// The stream is dropped when this returns, on every path.
///
/// # Errors
///
/// Returns an error on I/O failure or on a frame that is not JSON. Either
/// one ends the connection without a response for the failing frame.
pub async fn serve_connection<S>(stream: S, context: &ServerContext) -> Result<(), ConnectionError>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let mut transport = FrameTransport::new(stream, context.buffer_size());
    let dispatcher = context.dispatcher();

    loop {
        let Some(frame) = transport.read_frame().await? else {
            debug!("Peer closed connection");
            return Ok(());
        };
        trace!(bytes = frame.len(), "Received frame");

        let response = match decode_frame(frame).map_err(ConnectionError::FrameDecode)? {
            Incoming::Request(request) => dispatcher.handle(&request),
            Incoming::Invalid { error, id } => reject(&error, id),
        };

        transport.write_response(&response).await?;
    }
}
