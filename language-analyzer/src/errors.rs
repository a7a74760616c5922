use std::path::PathBuf;

use thiserror::Error;

/// Failures produced by [`crate::LanguageAnalyzer`].
#[derive(Debug, Error)]
pub enum AnalyzerError {
    /// The path handed to the analyzer is missing or is not a directory.
    /// Raised at construction only, never mid-walk.
    #[error("invalid directory {path}: {reason}")]
    InvalidDirectory { path: String, reason: &'static str },

    /// The directory could not be inspected for any other reason (permissions,
    /// symlink loops, I/O).
    #[error("cannot access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Filesystem failure while walking the tree (permissions, removed entries, I/O).
    /// The whole walk is aborted; no partial result is returned.
    #[error("traversal failed at {}: {source}", path.display())]
    Traversal {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
}

pub type Result<T> = std::result::Result<T, AnalyzerError>;
