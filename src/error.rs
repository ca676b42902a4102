use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading theme documents or configuration.
///
/// A resource missing from a loaded theme is never an error: resolution falls
/// back to a default value instead.
#[derive(Error, Debug)]
pub enum ThemeError {
    #[error("failed to read theme document {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed theme document {path:?}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("no theme selected")]
    NoThemeSelected,

    #[error("theme '{theme}' has no root 'dir' attribute")]
    MissingDirectory { theme: String },

    #[error("failed to read config {path:?}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid theme config: {0}")]
    ConfigParse(#[from] serde_json::Error),
}

/// Convenience type alias for Results with ThemeError
pub type Result<T> = std::result::Result<T, ThemeError>;
