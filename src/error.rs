use std::path::PathBuf;
use thiserror::Error;

/// Failures that abort a generation run
///
/// Page fetching never produces one of these; it degrades to an empty
/// [`crate::PageMeta`] instead.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// A required asset (master prompt, HTML template) or an existing keyword pool could not be read
    #[error("failed to read asset {path}: {source}")]
    Asset {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration file could not be read or parsed
    #[error("invalid config file {path}: {message}")]
    Config { path: PathBuf, message: String },

    /// A required environment variable is not set
    #[error("environment variable {0} is not set")]
    MissingEnv(String),

    /// The request to the generation service could not be completed
    #[error("generation request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The generation service answered with a non-success status
    #[error("generation service returned {status}: {message}")]
    Api { status: u16, message: String },

    /// The generation service answered without any usable text
    #[error("generation response contained no completion text")]
    EmptyCompletion,

    /// Variables could not be encoded, or the service response could not be decoded
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The generated document could not be written
    #[error("failed to write {path}: {source}")]
    Output {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, GenerateError>;
