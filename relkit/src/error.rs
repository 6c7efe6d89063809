//! All error types for the relkit crate.
//!
//! These are returned from every fallible operation (reading the project file,
//! bumping versions, loading configuration, validating localizations).

use std::{num::ParseIntError, path::PathBuf};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("file not found: {}", .0.display())]
    MissingFile(PathBuf),

    #[error("invalid version `{0}`")]
    InvalidVersion(String),

    #[error("unknown increment type `{0}` (expected major, minor or patch)")]
    UnknownBumpKind(String),

    #[error("build number `{value}` is not an integer")]
    InvalidBuildNumber {
        value: String,
        #[source]
        source: ParseIntError,
    },

    #[error("`{0}` cannot be incremented any further")]
    Overflow(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Creates a new configuration error
    pub fn config_error(message: impl Into<String>) -> Self {
        Error::Config(message.into())
    }
}
