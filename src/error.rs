//! Error types for reglink
//!
//! Provides a unified error type for all operations.

use thiserror::Error;

/// Result type alias using LinkError
pub type Result<T> = std::result::Result<T, LinkError>;

/// Unified error type for reglink operations
#[derive(Debug, Error)]
pub enum LinkError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Wire Protocol Errors
    // -------------------------------------------------------------------------
    #[error("Malformed packet: {0}")]
    MalformedPacket(String),

    // -------------------------------------------------------------------------
    // Transport Errors
    // -------------------------------------------------------------------------
    #[error("Transport error: {0}")]
    Transport(String),

    /// The link itself is gone and will never deliver again. Workers treat
    /// every other error as transient; only this one stops their loops.
    #[error("Link closed: {0}")]
    Closed(String),

    // -------------------------------------------------------------------------
    // Register Access Errors
    // -------------------------------------------------------------------------
    #[error("Register error: {0}")]
    Register(String),
}
