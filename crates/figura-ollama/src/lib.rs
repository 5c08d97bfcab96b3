//! Client for the Ollama `/api/generate` endpoint
//!
//! Sends one non-streaming generation request, optionally with an image
//! attached, and retries transient failures with a fixed pause between
//! attempts.

#![allow(
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_const_for_fn,
    clippy::module_name_repetitions
)]

mod client;
mod error;
mod http_client;
mod retry;
mod types;

pub use client::OllamaClient;
pub use error::{OllamaError, Result};
pub use retry::{DEFAULT_DELAY, DEFAULT_MAX_ATTEMPTS, RetryPolicy, Sleeper, TokioSleeper};
pub use types::{DEFAULT_TEMPERATURE, GenerationRequest};
