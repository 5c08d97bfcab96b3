//! Mock Ollama server for integration tests
//!
//! Serves `POST /api/generate` with canned per-model completions and
//! records every request body it receives.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{Json, Router, routing};
use tokio_util::sync::CancellationToken;

/// Mock model server that returns predictable completions
pub struct MockOllama {
    addr: SocketAddr,
    shutdown: CancellationToken,
    state: Arc<MockState>,
}

struct MockState {
    request_count: AtomicU32,
    /// Number of requests to fail with 503 before answering
    fail_count: AtomicU32,
    /// Completion text per model name
    responses: HashMap<String, String>,
    /// Bodies in arrival order
    requests: Mutex<Vec<serde_json::Value>>,
}

impl MockOllama {
    /// Start a mock that answers each listed model with its text
    pub async fn start(responses: &[(&str, &str)]) -> anyhow::Result<Self> {
        Self::start_inner(0, responses).await
    }

    /// Start a mock that fails the first `n` requests with 503
    pub async fn start_failing(n: u32, responses: &[(&str, &str)]) -> anyhow::Result<Self> {
        Self::start_inner(n, responses).await
    }

    async fn start_inner(fail_count: u32, responses: &[(&str, &str)]) -> anyhow::Result<Self> {
        let state = Arc::new(MockState {
            request_count: AtomicU32::new(0),
            fail_count: AtomicU32::new(fail_count),
            responses: responses
                .iter()
                .map(|(model, text)| ((*model).to_owned(), (*text).to_owned()))
                .collect(),
            requests: Mutex::new(Vec::new()),
        });

        let app = Router::new()
            .route("/api/generate", routing::post(handle_generate))
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let shutdown = CancellationToken::new();
        let shutdown_clone = shutdown.clone();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    shutdown_clone.cancelled().await;
                })
                .await
                .ok();
        });

        Ok(Self { addr, shutdown, state })
    }

    /// Base URL for the model client; `/api/generate` is appended by the client
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Number of generate requests received, failed ones included
    pub fn request_count(&self) -> u32 {
        self.state.request_count.load(Ordering::Relaxed)
    }

    /// Request bodies received so far
    pub fn requests(&self) -> Vec<serde_json::Value> {
        self.state.requests.lock().unwrap().clone()
    }
}

impl Drop for MockOllama {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

async fn handle_generate(State(state): State<Arc<MockState>>, Json(body): Json<serde_json::Value>) -> Response {
    state.request_count.fetch_add(1, Ordering::Relaxed);
    state.requests.lock().unwrap().push(body.clone());

    let should_fail = state
        .fail_count
        .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |n| n.checked_sub(1))
        .is_ok();
    if should_fail {
        return (StatusCode::SERVICE_UNAVAILABLE, "model is loading").into_response();
    }

    let model = body["model"].as_str().unwrap_or_default();
    match state.responses.get(model) {
        Some(text) => Json(serde_json::json!({
            "model": model,
            "response": text,
            "done": true
        }))
        .into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({ "error": format!("model '{model}' not found") })),
        )
            .into_response(),
    }
}
