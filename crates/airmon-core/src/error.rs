//! Shared error type across airmon crates.

use thiserror::Error;

/// Shared result type.
pub type Result<T> = std::result::Result<T, AirmonError>;

/// Unified error type used by core and agent.
#[derive(Debug, Error)]
pub enum AirmonError {
    /// Malformed sensor frame (length, header, or checksum mismatch).
    #[error("bad frame: {0}")]
    BadFrame(String),
    /// Frame carries a protocol version the decoder does not support.
    #[error("unsupported protocol version")]
    UnsupportedVersion,
    /// Invalid or unparseable configuration.
    #[error("bad config: {0}")]
    BadConfig(String),
    /// Exposition rendering failed (output sizing or allocation).
    #[error("render failed: {0}")]
    Render(String),
    /// Serial bus I/O failure (source level; logged and retried).
    #[error("io: {0}")]
    Io(String),
}
