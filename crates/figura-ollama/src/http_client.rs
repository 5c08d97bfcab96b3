use std::time::Duration;

use http::{HeaderMap, HeaderValue, header};
use reqwest::Client;

use crate::error::{OllamaError, Result};

/// Build the HTTP client used for model calls
///
/// Generation can take minutes on local hardware, so no timeout is set
/// unless one is configured.
pub(crate) fn build_client(timeout: Option<Duration>) -> Result<Client> {
    let mut headers = HeaderMap::new();
    headers.insert(header::CONNECTION, HeaderValue::from_static("keep-alive"));

    let mut builder = Client::builder()
        .pool_idle_timeout(Some(Duration::from_secs(30)))
        .tcp_nodelay(true)
        .tcp_keepalive(Some(Duration::from_secs(60)))
        .default_headers(headers);

    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }

    builder
        .build()
        .map_err(|e| OllamaError::Config(format!("failed to build HTTP client: {e}")))
}
