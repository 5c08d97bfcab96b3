use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, OllamaError>;

/// Errors raised while talking to the model server
#[derive(Debug, Error)]
pub enum OllamaError {
    /// The image attached to the request could not be read
    #[error("failed to read image {}", path.display())]
    Image {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// HTTP client could not be constructed
    #[error("invalid client configuration: {0}")]
    Config(String),

    /// Network or connection error
    #[error("connection error: {0}")]
    Connection(String),

    /// Model server answered with a non-2xx status
    #[error("model server returned {status}: {body}")]
    Status { status: u16, body: String },

    /// Response body could not be read
    #[error("failed to read response body: {0}")]
    Body(String),

    /// Every attempt failed
    #[error("Ollama API error after {attempts} attempts against {endpoint}: {last}")]
    RetriesExhausted {
        endpoint: String,
        attempts: u32,
        last: Box<OllamaError>,
    },
}

impl OllamaError {
    /// Whether another attempt may succeed
    ///
    /// Transport and HTTP failures are transient; a missing image file is not.
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Connection(_) | Self::Status { .. } | Self::Body(_))
    }

    /// Number of attempts made before giving up, if retries were exhausted
    pub const fn attempts(&self) -> Option<u32> {
        match self {
            Self::RetriesExhausted { attempts, .. } => Some(*attempts),
            _ => None,
        }
    }
}
