//! Crate-wide error type.
//!
//! One flat enum, a `Display` impl that renders a human-readable message, and
//! a blanket `std::error::Error` impl, in the style of this codebase's other
//! plain hand-rolled error enums rather than reaching for `thiserror`.

use std::fmt;

/// Error taxonomy for match-table extraction, interpolation, and verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TmfError {
    /// A parameter or record violates an invariant (magic, bounds, ordering).
    ValidationFailed(String),
    /// Structural defect in a match-table file: wrong header kind, non-zero
    /// pad, misordered matches, an essential match that fails to strictly
    /// improve on the inherited candidate, or residual bytes past the
    /// expected end.
    CorruptFile(String),
    /// An I/O stream ended before the expected number of bytes arrived.
    ShortRead,
    /// An I/O stream failed to accept the expected number of bytes.
    ShortWrite,
    /// The CLI named a match finder the build does not support.
    UnknownFinder(String),
    /// The verifier detected a mismatch between the match finder's output and
    /// the interpolated file. Carries the count of records read successfully
    /// before the failure.
    VerificationFailed { matches_read: u64, reason: String },
    /// Wraps an underlying `std::io::Error` that isn't itself a short
    /// read/write (file open failures, permission errors, and the like).
    Io(String),
}

impl fmt::Display for TmfError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TmfError::ValidationFailed(msg) => write!(f, "validation failed: {msg}"),
            TmfError::CorruptFile(msg) => write!(f, "corrupt file: {msg}"),
            TmfError::ShortRead => write!(f, "short read: stream ended before expected data arrived"),
            TmfError::ShortWrite => write!(f, "short write: stream did not accept all data"),
            TmfError::UnknownFinder(name) => write!(f, "unknown match finder: {name}"),
            TmfError::VerificationFailed { matches_read, reason } => {
                write!(f, "verification failed after reading {matches_read} matches: {reason}")
            }
            TmfError::Io(msg) => write!(f, "I/O error: {msg}"),
        }
    }
}

impl std::error::Error for TmfError {}

impl From<std::io::Error> for TmfError {
    fn from(err: std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::UnexpectedEof {
            TmfError::ShortRead
        } else {
            TmfError::Io(err.to_string())
        }
    }
}

pub type Result<T> = std::result::Result<T, TmfError>;
