//! Error types for textfmt.

use std::fmt;
use std::io;

/// Result type alias for textfmt operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for textfmt operations.
///
/// Conditions that are merely no-ops (an empty search term, undo at the start
/// of history, a commit of identical text) are never reported through this
/// type. They surface as `bool` or [`ReplaceOutcome`](crate::ReplaceOutcome)
/// values instead.
#[derive(Debug)]
pub enum Error {
    /// I/O error from a file-backed collaborator.
    Io(io::Error),
    /// The clipboard refused access (e.g., permission not granted).
    ClipboardDenied(String),
    /// Activity log data could not be encoded or decoded.
    Serialization(serde_json::Error),
    /// A rule name did not match any entry in the catalog.
    UnknownRule(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::ClipboardDenied(reason) => write!(f, "clipboard access denied: {reason}"),
            Self::Serialization(e) => write!(f, "serialization error: {e}"),
            Self::UnknownRule(name) => write!(f, "unknown rule: {name}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Serialization(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialization(e)
    }
}
