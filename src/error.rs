//! Error type shared by the snapshot codec, the index and the search engine.
//!
//! A symbol that is not in the snapshot is never an error: lookups return
//! `None` and reports render a zero count.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// The persisted snapshot could not be parsed or is missing its
    /// mandatory top-level fields. The previously active index is untouched.
    #[error("corrupt snapshot {}: {reason}", .path.display())]
    CorruptSnapshot { path: PathBuf, reason: String },

    /// The snapshot file could not be opened, read or written.
    #[error("failed to access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A pattern query did not compile.
    #[error("invalid search pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    /// No snapshot file exists at the configured location.
    #[error("no snapshot at {} (set `snapshot` in cdocs.toml or pass --snapshot)", .0.display())]
    NoSnapshot(PathBuf),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn corrupt(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Error::CorruptSnapshot {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
