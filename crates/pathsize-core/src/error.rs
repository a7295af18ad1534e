/// Error type shared by every fallible operation in the core.
///
/// Filesystem *absence* (a failed stat, an unreadable directory) is not an
/// error here: it is absorbed into zero sizes and empty child lists at the
/// point of discovery. Only usage errors and explicit mutations surface.
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T, E = TreeError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum TreeError {
    /// The empty path was resolved before "/" was ever registered.
    #[error("root \"/\" has not been registered")]
    UnregisteredRoot,

    /// `unregister` was called for a path the registry does not hold.
    #[error("path is not registered: {path}")]
    NotFound { path: String },

    /// The underlying removal call failed.
    #[error("failed to delete {path}: {source}")]
    Deletion {
        path: String,
        #[source]
        source: io::Error,
    },

    /// Size aggregation re-entered a directory that is still being summed,
    /// i.e. the tree loops back on itself through a symlink.
    #[error("directory cycle detected at {path}")]
    CycleDetected { path: String },

    /// A raw path could not be turned into an absolute one.
    #[error("cannot normalize path {path:?}: {source}")]
    Normalize {
        path: String,
        #[source]
        source: io::Error,
    },

    /// An exclusion pattern is not a valid regular expression.
    #[error("invalid exclusion pattern {pattern:?}: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// The configuration file could not be read or parsed.
    #[error("invalid configuration {}: {message}", path.display())]
    Config { path: PathBuf, message: String },
}
