//! Error types for configuration loading and shell construction.

use std::path::PathBuf;

/// Errors raised while building a [`crate::MetaShell`].
///
/// Rendering itself never fails; these only surface when configuration or
/// the template are loaded.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid site configuration: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid site configuration in {path}: {source}")]
    JsonFile {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("path separator must not be empty")]
    InvalidSeparator,

    #[error("failed to build marker pattern for tag `{key}`: {source}")]
    Marker {
        key: String,
        #[source]
        source: regex::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
