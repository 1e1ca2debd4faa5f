//! Error types for gdtlink
//!
//! Provides a unified error type for all operations.

use thiserror::Error;

/// Result type alias using GdtError
pub type Result<T> = std::result::Result<T, GdtError>;

/// Unified error type for gdtlink operations
#[derive(Debug, Error)]
pub enum GdtError {
    // -------------------------------------------------------------------------
    // Transport Errors
    // -------------------------------------------------------------------------
    #[error("connection to DUT failed: {0}")]
    Connection(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Codec Errors
    // -------------------------------------------------------------------------
    #[error("decode error: {0}")]
    Decode(String),

    #[error("unknown value type: {0}")]
    UnknownType(String),

    // -------------------------------------------------------------------------
    // Value Store Errors
    // -------------------------------------------------------------------------
    #[error("no usable cache entry for key '{0}'")]
    CacheMiss(String),

    #[error("parameter '{0}' not found in snapshot")]
    ItemNotFound(String),

    #[error("cache storage error: {0}")]
    Storage(String),

    // -------------------------------------------------------------------------
    // Parameter Client Errors
    // -------------------------------------------------------------------------
    #[error("type '{0}' is not settable by this client")]
    UnsupportedType(String),

    #[error("value {value} does not match type '{kind}'")]
    TypeMismatch { value: String, kind: String },

    #[error("verification failed for '{id}': expected {expected}, device reports {actual}")]
    VerificationFailed {
        id: String,
        expected: String,
        actual: String,
    },
}
