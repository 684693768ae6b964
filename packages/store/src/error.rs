//! Error types for the store.
//!
//! The driver performs no retries and no silent recovery: every failure is
//! returned verbatim to the immediate caller. Filesystem and serde errors
//! pass through unwrapped so embedders can match on the underlying cause.

use std::path::PathBuf;

/// Errors returned by [`crate::Driver`] operations.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// An empty collection name was supplied. Rejected before any I/O.
    #[error("missing collection - no place to save record")]
    MissingCollection,

    /// An empty resource name was supplied. Rejected before any I/O.
    #[error("missing resource - unable to save record (no name)")]
    MissingResource,

    /// The target was absent under both the bare and `.json`-suffixed forms.
    #[error("unable to find file or directory named {}", path.display())]
    NotFound { path: PathBuf },

    /// Directory-creation, file-write, file-read, or rename failure.
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// JSON encode/decode failure.
    #[error("{0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn not_found(path: impl Into<PathBuf>) -> Error {
        Error::NotFound { path: path.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_attempted_path() {
        let e = Error::not_found("base/users/ghost");
        assert!(format!("{}", e).contains("base/users/ghost"));
    }

    #[test]
    fn io_error_converts() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let e: Error = io_err.into();
        assert!(matches!(e, Error::Io(_)));
    }

    #[test]
    fn validation_errors_name_the_missing_argument() {
        assert!(format!("{}", Error::MissingCollection).contains("collection"));
        assert!(format!("{}", Error::MissingResource).contains("resource"));
    }
}
