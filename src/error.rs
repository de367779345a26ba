use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures while loading or validating a [`BoardConfig`](crate::config::BoardConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Top-level error for the binary front end.
///
/// The simulation core never fails; everything here comes from the
/// surrounding configuration, terminal and output plumbing.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("terminal error: {0}")]
    Io(#[from] io::Error),
    #[error("failed to encode snapshot: {0}")]
    Json(#[from] serde_json::Error),
}
