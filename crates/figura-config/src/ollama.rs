use std::time::Duration;

use serde::Deserialize;
use url::Url;

/// Default address of a locally running Ollama server
const DEFAULT_BASE_URL: &str = "http://localhost:11434";

/// Connection settings for the model-serving endpoint
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OllamaConfig {
    /// Base URL; `/api/generate` is appended per request
    #[serde(default = "default_base_url")]
    pub base_url: Url,
    /// Whole-request timeout (e.g. "5m"). Absent means no client timeout.
    #[serde(default)]
    pub timeout: Option<String>,
    #[serde(default)]
    pub retry: RetryConfig,
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout: None,
            retry: RetryConfig::default(),
        }
    }
}

impl OllamaConfig {
    /// Parse the configured timeout
    ///
    /// # Errors
    ///
    /// Returns an error if the timeout is not a valid duration string
    pub fn timeout_duration(&self) -> anyhow::Result<Option<Duration>> {
        self.timeout.as_deref().map(parse_duration).transpose()
    }
}

/// Fixed-delay retry policy for model calls
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RetryConfig {
    /// Total attempts per model call, including the first
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    /// Pause between consecutive attempts (e.g. "2s")
    #[serde(default = "default_delay")]
    pub delay: String,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            delay: default_delay(),
        }
    }
}

impl RetryConfig {
    /// Parse the configured delay
    ///
    /// # Errors
    ///
    /// Returns an error if the delay is not a valid duration string
    pub fn delay_duration(&self) -> anyhow::Result<Duration> {
        parse_duration(&self.delay)
    }
}

fn parse_duration(s: &str) -> anyhow::Result<Duration> {
    duration_str::parse(s).map_err(|e| anyhow::anyhow!("invalid duration '{s}': {e}"))
}

#[allow(clippy::expect_used)]
fn default_base_url() -> Url {
    Url::parse(DEFAULT_BASE_URL).expect("default base URL must parse")
}

#[allow(clippy::missing_const_for_fn)]
fn default_max_attempts() -> u32 {
    3
}

fn default_delay() -> String {
    "2s".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_local_ollama() {
        let config = OllamaConfig::default();
        assert_eq!(config.base_url.as_str(), "http://localhost:11434/");
        assert_eq!(config.retry.max_attempts, 3);
        assert_eq!(config.retry.delay_duration().unwrap(), Duration::from_secs(2));
        assert_eq!(config.timeout_duration().unwrap(), None);
    }

    #[test]
    fn parses_human_durations() {
        let config: OllamaConfig = toml::from_str(
            r#"
            timeout = "5m"

            [retry]
            max_attempts = 5
            delay = "250ms"
            "#,
        )
        .unwrap();

        assert_eq!(config.timeout_duration().unwrap(), Some(Duration::from_secs(300)));
        assert_eq!(config.retry.delay_duration().unwrap(), Duration::from_millis(250));
        assert_eq!(config.retry.max_attempts, 5);
    }

    #[test]
    fn invalid_delay_is_reported() {
        let retry = RetryConfig {
            max_attempts: 3,
            delay: "soon".to_owned(),
        };
        let err = retry.delay_duration().unwrap_err();
        assert!(err.to_string().contains("soon"));
    }
}
