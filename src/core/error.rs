//! Error types for the stronghold scanner

use thiserror::Error;

/// Main error type for the crate
///
/// Layout failures are not errors: a branch that cannot grow simply yields
/// `None`. This type covers the recoverable problems at the edges (files,
/// configuration, command-line input).
#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Argument error: {0}")]
    Argument(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Config(err.to_string())
    }
}
