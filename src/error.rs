use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LaunchError {
    /// `execute` was called before a binary was set or looked up.
    #[error("no binary specified")]
    MissingBinary,

    /// The dispatcher was handed an empty argument vector.
    #[error("missing required command parameter")]
    MissingCommand,

    #[error("binary '{name}' not found: {source}")]
    LookupFailed {
        name: String,
        #[source]
        source: which::Error,
    },

    #[error("failed to launch {}: {source}", .binary.display())]
    LaunchFailed {
        binary: PathBuf,
        #[source]
        source: io::Error,
    },
}

pub type Result<T> = std::result::Result<T, LaunchError>;
