//! Configuration error types.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file exists but is not a valid `Config` in RON.
    #[error("malformed config: {0}")]
    Parse(#[from] ron::error::SpannedError),

    #[error("cannot serialize config: {0}")]
    Serialize(#[from] ron::Error),

    /// A setting is outside the range the world or pathfinder accepts.
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}
