use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum BenchError {
    /// Missing credential or unusable setup. Aborts the run before any request.
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Invalid prompt: {0}")]
    InvalidPrompt(String),

    /// The provider answered with a non-success status. `body` is kept verbatim.
    #[error("Provider error (status {status}): {body}")]
    Provider { status: u16, body: String },

    #[error("Network error: {message}")]
    Network {
        message: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Parse error: {message}")]
    Parse {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Filesystem error at {}: {source}", path.display())]
    Filesystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl BenchError {
    pub(crate) fn parse(message: impl Into<String>) -> Self {
        BenchError::Parse {
            message: message.into(),
            source: None,
        }
    }

    pub(crate) fn filesystem(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        BenchError::Filesystem {
            path: path.into(),
            source,
        }
    }
}
