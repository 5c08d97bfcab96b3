use std::path::PathBuf;

use serde::Serialize;

/// Default sampling temperature when a caller does not choose one
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// A single non-streaming generation call
///
/// Built per call and dropped once the completion text is returned.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    /// Model identifier, e.g. "llava" or "codellama"
    pub model: String,
    /// Prompt text
    pub prompt: String,
    /// Image file to attach; read fully and sent base64-encoded
    pub image: Option<PathBuf>,
    /// Sampling temperature
    pub temperature: f32,
    /// Override for the client's attempt budget
    pub max_attempts: Option<u32>,
}

impl GenerationRequest {
    pub fn new(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            prompt: prompt.into(),
            image: None,
            temperature: DEFAULT_TEMPERATURE,
            max_attempts: None,
        }
    }

    #[must_use]
    pub fn with_image(mut self, path: impl Into<PathBuf>) -> Self {
        self.image = Some(path.into());
        self
    }

    #[must_use]
    pub const fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    #[must_use]
    pub const fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = Some(max_attempts);
        self
    }
}

/// Wire format for `POST /api/generate`
#[derive(Debug, Serialize)]
pub(crate) struct WireRequest<'a> {
    pub model: &'a str,
    pub prompt: &'a str,
    /// Always false: the full completion comes back in one body
    pub stream: bool,
    pub temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
}

/// Pull the completion text out of a response body
///
/// Ollama answers `{"response": "..."}`. Anything else, including a body
/// that is not JSON at all, is returned verbatim.
pub(crate) fn completion_text(body: String) -> String {
    match serde_json::from_str::<serde_json::Value>(&body) {
        Ok(serde_json::Value::Object(mut map)) => match map.remove("response") {
            Some(serde_json::Value::String(text)) => text,
            _ => body,
        },
        _ => body,
    }
}
