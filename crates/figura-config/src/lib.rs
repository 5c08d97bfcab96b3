#![allow(clippy::must_use_candidate)]

pub mod cors;
pub mod health;
mod loader;
pub mod ollama;
pub mod pipeline;
pub mod server;
pub mod telemetry;

use serde::Deserialize;

pub use cors::*;
pub use health::*;
pub use ollama::*;
pub use pipeline::*;
pub use server::*;
pub use telemetry::*;

/// Top-level figura configuration
///
/// Every section has defaults, so an empty document (or no file at all)
/// yields a working configuration pointed at a local Ollama instance.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Model server connection and retry policy
    #[serde(default)]
    pub ollama: OllamaConfig,
    /// Models and sampling settings for the two generation stages
    #[serde(default)]
    pub pipeline: PipelineConfig,
    /// Logging configuration
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}
