use std::backtrace::Backtrace;
use std::fmt::{self, Write as _};

use axum::{
    Json,
    response::{IntoResponse, Response},
};
use figura_ollama::OllamaError;
use http::StatusCode;
use serde::Serialize;
use thiserror::Error;

/// Failures while handling a code generation request
///
/// There is no partial success: a failed vision call stops the request
/// before the code model is called.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// The multipart body did not carry a usable design file
    #[error("invalid upload: {0}")]
    Upload(String),

    /// The vision model call failed
    #[error("error with vision model '{model}'")]
    Vision {
        model: String,
        #[source]
        source: OllamaError,
        trace: Trace,
    },

    /// The code generation model call failed
    #[error("error with code model '{model}'")]
    Codegen {
        model: String,
        #[source]
        source: OllamaError,
        trace: Trace,
    },

    /// Anything else, e.g. the upload could not be stored
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

/// Stack captured where a model error was raised
#[derive(Debug)]
pub struct Trace(Backtrace);

impl Trace {
    fn capture() -> Self {
        Self(Backtrace::force_capture())
    }
}

impl fmt::Display for Trace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl GenerateError {
    pub fn vision(model: impl Into<String>, source: OllamaError) -> Self {
        Self::Vision {
            model: model.into(),
            source,
            trace: Trace::capture(),
        }
    }

    pub fn codegen(model: impl Into<String>, source: OllamaError) -> Self {
        Self::Codegen {
            model: model.into(),
            source,
            trace: Trace::capture(),
        }
    }

    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::Upload(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Vision { .. } | Self::Codegen { .. } | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message plus the full cause chain and the stack where it was raised
    pub fn detail(&self) -> String {
        let mut detail = format!("Error: {self}");

        match self {
            Self::Internal(e) => {
                let _ = write!(detail, "\n\n{e:?}");
            }
            Self::Upload(_) => {}
            Self::Vision { trace, .. } | Self::Codegen { trace, .. } => {
                let mut source = std::error::Error::source(self);
                if source.is_some() {
                    detail.push_str("\n\nCaused by:");
                }
                let mut depth = 0;
                while let Some(cause) = source {
                    let _ = write!(detail, "\n    {depth}: {cause}");
                    source = cause.source();
                    depth += 1;
                }
                let _ = write!(detail, "\n\nStack backtrace:\n{trace}");
            }
        }

        detail
    }
}

/// JSON error body: `{"detail": "Error: ..."}`
#[derive(Debug, Serialize)]
struct ErrorResponse {
    detail: String,
}

impl IntoResponse for GenerateError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!(error = %self, "code generation failed");
        } else {
            tracing::debug!(error = %self, "rejected upload");
        }

        (status, Json(ErrorResponse { detail: self.detail() })).into_response()
    }
}
