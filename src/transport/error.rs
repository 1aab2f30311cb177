//! Error type for transport operations.

use thiserror::Error;

/// Failure of a single HTTP exchange.
///
/// Describes what went wrong on the wire without deciding whether the
/// engine should retry; that classification happens in the engine.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Network connection failed.
    ///
    /// Covers DNS resolution failures, refused connections, resets and
    /// failures while reading the response body.
    #[error("Connection error: {0}")]
    Connection(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The transport itself gave up waiting for the server.
    #[error("Request timed out")]
    Timeout,

    /// The request could not be built (malformed URL, bad header).
    ///
    /// Retrying cannot fix this.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}
