//! Programmatic configuration builder for integration tests

use std::net::SocketAddr;
use std::path::Path;

use figura_config::{Config, CorsConfig};

/// Builder for constructing test configurations
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a new builder with fast retries and a scratch upload directory
    pub fn new() -> Self {
        let mut config = Config::default();
        config.server.listen_address = SocketAddr::from(([127, 0, 0, 1], 0));
        config.server.upload_dir = std::env::temp_dir().join("figura-integration-uploads");
        config.ollama.retry.delay = "10ms".to_owned();

        Self { config }
    }

    /// Point the model client at a mock Ollama server
    pub fn with_ollama(mut self, base_url: &str) -> Self {
        self.config.ollama.base_url = base_url.parse().expect("valid URL");
        self
    }

    pub fn with_upload_dir(mut self, dir: &Path) -> Self {
        self.config.server.upload_dir = dir.to_path_buf();
        self
    }

    pub fn with_max_attempts(mut self, attempts: u32) -> Self {
        self.config.ollama.retry.max_attempts = attempts;
        self
    }

    pub fn with_models(mut self, vision: &str, codegen: &str) -> Self {
        self.config.pipeline.vision.model = vision.to_owned();
        self.config.pipeline.codegen.model = codegen.to_owned();
        self
    }

    pub fn with_cors(mut self, config: CorsConfig) -> Self {
        self.config.server.cors = Some(config);
        self
    }

    /// Disable health endpoint
    pub fn without_health(mut self) -> Self {
        self.config.server.health.enabled = false;
        self
    }

    /// Build the final config
    pub fn build(self) -> Config {
        self.config.validate().expect("valid test config");
        self.config
    }
}
