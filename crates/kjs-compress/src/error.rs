//! Errors from the files a session reads and writes.

use std::path::PathBuf;
use thiserror::Error;

/// Error type for compression sessions.
///
/// Rendering itself never fails; these cover the files a session reads
/// and writes around it.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Cannot read blacklist at {path}: {source}")]
    BlacklistRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot write {what} at {path}: {source}")]
    ArtifactWrite {
        what: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read config at {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config at {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Confirmation prompt failed: {0}")]
    Prompt(#[from] std::io::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
