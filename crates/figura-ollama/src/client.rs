use std::time::Duration;

use base64::{Engine, engine::general_purpose::STANDARD};
use reqwest::Client;
use url::Url;

use crate::{
    error::{OllamaError, Result},
    http_client::build_client,
    retry::RetryPolicy,
    types::{GenerationRequest, WireRequest, completion_text},
};

/// Path of the non-chat generation endpoint
const GENERATE_PATH: &str = "api/generate";

/// Client for a local Ollama server
///
/// Each [`OllamaClient::generate`] call is independent: no caching and no
/// state survives between calls.
#[derive(Debug, Clone)]
pub struct OllamaClient {
    client: Client,
    endpoint: String,
    retry: RetryPolicy,
}

impl OllamaClient {
    /// Create a client for the server at `base_url`
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built
    pub fn new(base_url: &Url, timeout: Option<Duration>, retry: RetryPolicy) -> Result<Self> {
        let endpoint = format!("{}/{GENERATE_PATH}", base_url.as_str().trim_end_matches('/'));

        Ok(Self {
            client: build_client(timeout)?,
            endpoint,
            retry,
        })
    }

    /// Full URL that generation requests are posted to
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub const fn retry_policy(&self) -> &RetryPolicy {
        &self.retry
    }

    /// Run one generation and return the completion text
    ///
    /// The image, when present, is read once up front. Transport errors and
    /// non-2xx answers are retried according to the retry policy.
    ///
    /// # Errors
    ///
    /// Returns [`OllamaError::Image`] if the image cannot be read, or
    /// [`OllamaError::RetriesExhausted`] once every attempt has failed
    pub async fn generate(&self, request: &GenerationRequest) -> Result<String> {
        let images = match &request.image {
            Some(path) => {
                let bytes = tokio::fs::read(path).await.map_err(|source| OllamaError::Image {
                    path: path.clone(),
                    source,
                })?;
                Some(vec![STANDARD.encode(bytes)])
            }
            None => None,
        };

        let wire = WireRequest {
            model: &request.model,
            prompt: &request.prompt,
            stream: false,
            temperature: request.temperature,
            images,
        };

        tracing::debug!(
            model = %request.model,
            endpoint = %self.endpoint,
            with_image = wire.images.is_some(),
            "sending generation request"
        );

        let text = self
            .retry
            .run(&self.endpoint, request.max_attempts, |attempt| self.send_once(&wire, attempt))
            .await?;

        tracing::debug!(model = %request.model, chars = text.len(), "generation complete");

        Ok(text)
    }

    async fn send_once(&self, wire: &WireRequest<'_>, attempt: u32) -> Result<String> {
        tracing::trace!(model = %wire.model, attempt, "posting to model server");

        let response = self
            .client
            .post(&self.endpoint)
            .json(wire)
            .send()
            .await
            .map_err(|e| OllamaError::Connection(e.to_string()))?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());
            return Err(OllamaError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await.map_err(|e| OllamaError::Body(e.to_string()))?;

        Ok(completion_text(body))
    }
}
