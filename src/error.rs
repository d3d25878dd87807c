//! # Error Types
//!
//! This module defines error types used throughout the impresora library.

use thiserror::Error;

/// Main error type for impresora operations
#[derive(Debug, Error)]
pub enum ImpresoraError {
    /// Invalid argument for a directive (bad barcode payload, malformed hex, ...)
    ///
    /// Raised before any byte of the rejected directive reaches the buffer.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The code-page transcoder rejected the input
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// The transport reported a failure while sending a flushed buffer
    #[error("Transfer error: {0}")]
    Transfer(String),

    /// Pixel source could not be decoded
    #[error("Image error: {0}")]
    Image(String),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ImpresoraError {
    /// Shorthand for building an [`ImpresoraError::InvalidArgument`].
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }
}

impl From<image::ImageError> for ImpresoraError {
    fn from(err: image::ImageError) -> Self {
        Self::Image(err.to_string())
    }
}

/// Convenience alias used by every fallible operation in the crate
pub type Result<T, E = ImpresoraError> = std::result::Result<T, E>;
