//! HTTP surface for figura
//!
//! Routes:
//! - `GET /` liveness message
//! - `GET {health.path}` plain `ok` when enabled
//! - `POST /generate-code/` design upload to Angular component sources

#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

mod cors;
mod error;
mod pipeline;
mod prompts;
mod routes;
mod upload;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::{Router, extract::DefaultBodyLimit, routing};
use figura_config::Config;
use figura_ollama::{OllamaClient, RetryPolicy};
use tower_http::trace::TraceLayer;

pub use error::{GenerateError, Trace};
pub use pipeline::{GenerateResponse, Pipeline};

/// Shared state for the generation route
#[derive(Debug)]
pub(crate) struct AppState {
    pipeline: Pipeline,
    upload_dir: PathBuf,
}

/// Assembled server with all routes and middleware
pub struct Server {
    router: Router,
    listen_address: SocketAddr,
}

impl Server {
    /// Build the server from configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the retry or timeout settings cannot be parsed
    /// or the model client cannot be built
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let retry = RetryPolicy::new(
            config.ollama.retry.max_attempts,
            config.ollama.retry.delay_duration()?,
        );
        let client = OllamaClient::new(&config.ollama.base_url, config.ollama.timeout_duration()?, retry)?;

        tracing::debug!(
            endpoint = client.endpoint(),
            vision = %config.pipeline.vision.model,
            codegen = %config.pipeline.codegen.model,
            "model client ready"
        );

        Ok(Self::with_client(config, client))
    }

    /// Build the server around an existing model client
    pub fn with_client(config: Config, client: OllamaClient) -> Self {
        let state = Arc::new(AppState {
            pipeline: Pipeline::new(client, &config.pipeline),
            upload_dir: config.server.upload_dir,
        });

        let mut app = Router::new()
            .route("/", routing::get(routes::root_handler))
            .route("/generate-code/", routing::post(routes::generate_code_handler))
            .layer(DefaultBodyLimit::max(config.server.body_limit))
            .with_state(state);

        if config.server.health.enabled {
            app = app.route(&config.server.health.path, routing::get(routes::health_handler));
        }

        app = app.layer(TraceLayer::new_for_http());

        if let Some(ref cors_config) = config.server.cors {
            app = app.layer(cors::cors_layer(cors_config));
        }

        Self {
            router: app,
            listen_address: config.server.listen_address,
        }
    }

    /// Get the configured listen address
    #[must_use]
    pub const fn listen_address(&self) -> SocketAddr {
        self.listen_address
    }

    /// Consume the server and return the inner router
    ///
    /// Useful for testing when the caller manages the listener
    pub fn into_router(self) -> Router {
        self.router
    }

    /// Start serving requests
    ///
    /// Blocks until the cancellation token is triggered.
    ///
    /// # Errors
    ///
    /// Returns an error if binding the TCP listener or serving fails
    pub async fn serve(self, shutdown: tokio_util::sync::CancellationToken) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(self.listen_address).await?;
        let local_addr = listener.local_addr()?;
        tracing::info!(%local_addr, "server listening");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                shutdown.cancelled().await;
                tracing::info!("graceful shutdown initiated");
            })
            .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use http::{Request, StatusCode, header};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use super::*;

    const BOUNDARY: &str = "figura-test-boundary";

    /// Model server address that refuses connections
    const UNREACHABLE: &str = "http://127.0.0.1:1";

    fn test_config(upload_dir: &std::path::Path) -> Config {
        let mut config = Config::default();
        config.server.upload_dir = upload_dir.to_path_buf();
        config.ollama.base_url = UNREACHABLE.parse().unwrap();
        config.ollama.retry.max_attempts = 1;
        config.ollama.retry.delay = "1ms".to_string();
        config
    }

    fn router(config: Config) -> Router {
        Server::new(config).unwrap().into_router()
    }

    fn multipart(field: &str, filename: &str, data: &[u8]) -> Request<Body> {
        let mut body = format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"{filename}\"\r\nContent-Type: image/png\r\n\r\n"
        )
        .into_bytes();
        body.extend_from_slice(data);
        body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

        Request::post("/generate-code/")
            .header(header::CONTENT_TYPE, format!("multipart/form-data; boundary={BOUNDARY}"))
            .body(Body::from(body))
            .unwrap()
    }

    async fn json_body(response: axum::response::Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn root_reports_liveness() {
        let dir = tempfile::tempdir().unwrap();
        let response = router(test_config(dir.path()))
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            json_body(response).await,
            serde_json::json!({ "message": "Backend is running!" })
        );
    }

    #[tokio::test]
    async fn health_route_follows_config() {
        let dir = tempfile::tempdir().unwrap();

        let response = router(test_config(dir.path()))
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let mut config = test_config(dir.path());
        config.server.health.enabled = false;
        let response = router(config)
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn non_multipart_body_is_unprocessable() {
        let dir = tempfile::tempdir().unwrap();
        let request = Request::post("/generate-code/")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{}"))
            .unwrap();

        let response = router(test_config(dir.path())).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let detail = json_body(response).await["detail"].as_str().unwrap().to_string();
        assert!(detail.contains("multipart/form-data"));
    }

    #[tokio::test]
    async fn missing_file_field_is_unprocessable() {
        let dir = tempfile::tempdir().unwrap();
        let response = router(test_config(dir.path()))
            .oneshot(multipart("image", "login.png", b"png"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let detail = json_body(response).await["detail"].as_str().unwrap().to_string();
        assert!(detail.contains("'file'"));
    }

    #[tokio::test]
    async fn unreachable_model_server_is_internal_error_and_cleans_up() {
        let dir = tempfile::tempdir().unwrap();
        let response = router(test_config(dir.path()))
            .oneshot(multipart("file", "login.png", b"png"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let detail = json_body(response).await["detail"].as_str().unwrap().to_string();
        assert!(detail.starts_with("Error: error with vision model 'llava'"));
        assert!(detail.contains("after 1 attempts"));

        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn cors_preflight_allows_any_origin_with_credentials_by_default() {
        let dir = tempfile::tempdir().unwrap();
        let request = Request::options("/generate-code/")
            .header(header::ORIGIN, "http://localhost:4200")
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
            .body(Body::empty())
            .unwrap();

        let response = router(test_config(dir.path())).oneshot(request).await.unwrap();
        let headers = response.headers();

        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "http://localhost:4200");
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_CREDENTIALS], "true");
    }

    #[test]
    fn invalid_retry_delay_fails_construction() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = test_config(dir.path());
        config.ollama.retry.delay = "soon".to_string();

        assert!(Server::new(config).is_err());
    }
}
