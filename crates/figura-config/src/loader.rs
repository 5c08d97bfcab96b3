use std::path::Path;

use crate::{Config, StageConfig};

/// Sampling temperatures accepted by Ollama
const TEMPERATURE_RANGE: std::ops::RangeInclusive<f32> = 0.0..=2.0;

impl Config {
    /// Load configuration from a TOML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, TOML parsing fails,
    /// or validation fails
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read config file {}: {e}", path.display()))?;

        let config = Self::parse(&raw)?;
        config.validate()?;

        Ok(config)
    }

    /// Load from `path` when given, otherwise fall back to defaults
    ///
    /// # Errors
    ///
    /// Returns an error under the same conditions as [`Config::load`]
    pub fn load_or_default(path: Option<&Path>) -> anyhow::Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => {
                tracing::debug!("no config file given, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Parse a TOML document without validating it
    ///
    /// # Errors
    ///
    /// Returns an error if the document is not valid TOML or contains
    /// unknown fields
    pub fn parse(raw: &str) -> anyhow::Result<Self> {
        toml::from_str(raw).map_err(|e| anyhow::anyhow!("failed to parse config: {e}"))
    }

    /// Validate that the configuration is internally consistent
    ///
    /// # Errors
    ///
    /// Returns an error if the retry policy, stage settings, or server
    /// settings are unusable
    pub fn validate(&self) -> anyhow::Result<()> {
        self.validate_ollama_config()?;
        validate_stage("vision", &self.pipeline.vision)?;
        validate_stage("codegen", &self.pipeline.codegen)?;
        self.validate_server_config()?;
        Ok(())
    }

    fn validate_ollama_config(&self) -> anyhow::Result<()> {
        if self.ollama.retry.max_attempts == 0 {
            anyhow::bail!("ollama.retry.max_attempts must be at least 1");
        }

        self.ollama.retry.delay_duration()?;
        self.ollama.timeout_duration()?;

        Ok(())
    }

    fn validate_server_config(&self) -> anyhow::Result<()> {
        if self.server.upload_dir.as_os_str().is_empty() {
            anyhow::bail!("server.upload_dir must not be empty");
        }

        if self.server.body_limit == 0 {
            anyhow::bail!("server.body_limit must be greater than 0");
        }

        Ok(())
    }
}

fn validate_stage(name: &str, stage: &StageConfig) -> anyhow::Result<()> {
    if stage.model.trim().is_empty() {
        anyhow::bail!("pipeline.{name}.model must not be empty");
    }

    if !TEMPERATURE_RANGE.contains(&stage.temperature) {
        anyhow::bail!(
            "pipeline.{name}.temperature must be between {} and {}, got {}",
            TEMPERATURE_RANGE.start(),
            TEMPERATURE_RANGE.end(),
            stage.temperature
        );
    }

    Ok(())
}
