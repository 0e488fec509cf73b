use std::path::PathBuf;
use thiserror::Error;

/// Fatal errors. Anything that only concerns a single file is reported inside
/// the document instead (see [`SectionBody::ReadError`](crate::SectionBody::ReadError)).
#[derive(Debug, Error)]
pub enum RepodumpError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The finished report could not be persisted.
    #[error("failed to write report to {path}: {source}")]
    Output {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Walk error: {0}")]
    Walk(String),
    #[error("Invalid path: {0}")]
    InvalidPath(String),
    #[error("Invalid configuration in {path}: {reason}")]
    Config { path: PathBuf, reason: String },
}

impl RepodumpError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        RepodumpError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn output(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        RepodumpError::Output {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn config(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        RepodumpError::Config {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}
