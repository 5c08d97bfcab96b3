//! Logging setup for figura
//!
//! Installs a `tracing-subscriber` registry with an `EnvFilter` and a
//! `fmt` layer in either human-readable or JSON form.

use figura_config::{LogFormat, TelemetryConfig};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used when the configured directive does not parse
const FALLBACK_FILTER: &str = "info";

/// Initialize the global tracing subscriber from configuration
///
/// An invalid filter directive falls back to `info` rather than failing
/// startup. Calling this more than once keeps the first subscriber.
pub fn init(config: &TelemetryConfig) {
    let filter = build_filter(&config.filter);

    let result = match config.format {
        LogFormat::Text => {
            let fmt_layer = tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false);

            tracing_subscriber::registry().with(filter).with(fmt_layer).try_init()
        }
        LogFormat::Json => {
            let fmt_layer = tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(true)
                .with_target(true);

            tracing_subscriber::registry().with(filter).with(fmt_layer).try_init()
        }
    };

    if let Err(e) = result {
        tracing::debug!(error = %e, "tracing subscriber already installed");
    }
}

fn build_filter(directive: &str) -> EnvFilter {
    EnvFilter::try_new(directive).unwrap_or_else(|e| {
        eprintln!("invalid log filter '{directive}': {e}, falling back to '{FALLBACK_FILTER}'");
        EnvFilter::new(FALLBACK_FILTER)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_directive_is_kept() {
        let filter = build_filter("debug");
        assert_eq!(filter.to_string(), "debug");
    }

    #[test]
    fn invalid_directive_falls_back() {
        let filter = build_filter("figura_ollama=shouting");
        assert_eq!(filter.to_string(), FALLBACK_FILTER);
    }

    #[test]
    fn init_twice_does_not_panic() {
        let config = TelemetryConfig::default();
        init(&config);
        init(&config);
    }
}
