//! Transport error types for the wiretap pipeline.

use thiserror::Error;

/// Failure raised by the downstream transport while forwarding a request.
///
/// Middleware observing the pipeline re-raises these unchanged. The variants
/// exist for the transport's own reporting; observers must not branch on
/// them.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The connection to the remote endpoint could not be established.
    #[error("connect failed: {0}")]
    Connect(String),

    /// An I/O failure occurred while the exchange was in flight.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// The connection was closed before the exchange completed.
    #[error("connection closed: {0}")]
    Closed(String),
}
