//! Error types for ANN index operations.

use thiserror::Error;

/// Result type alias using this crate's [`Error`] type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during index construction, insertion, search, or
/// persistence.
///
/// An empty result from searching an untrained index is not an error: it
/// is a well-defined empty array. Only malformed input, bad configuration,
/// or I/O failure produce an `Err`.
#[derive(Debug, Error)]
pub enum Error {
    /// Vector dimension mismatch between the index and the input.
    #[error("dimension mismatch: expected {expected}, got {got}")]
    InvalidShape { expected: usize, got: usize },

    /// Construction parameters failed validation (e.g. `M < 2`,
    /// `ef_construction < M`, `m_L <= 0`).
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// Persistence I/O failure: truncated or corrupted blob, checksum
    /// mismatch, or an unsupported format version.
    #[error("io failure: {0}")]
    Io(String),
}
