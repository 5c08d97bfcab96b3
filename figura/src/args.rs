use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use figura_config::Config;
use url::Url;

/// Figura design-to-code service
#[derive(Debug, Parser)]
#[command(name = "figura", about = "Turns UI design images into Angular components using local Ollama models")]
pub struct Args {
    /// Path to configuration file; built-in defaults are used when omitted
    #[arg(short, long, env = "FIGURA_CONFIG")]
    pub config: Option<PathBuf>,

    /// Override the listen address
    #[arg(long, env = "FIGURA_LISTEN")]
    pub listen: Option<SocketAddr>,

    /// Override the Ollama base URL
    #[arg(long, env = "FIGURA_OLLAMA_URL")]
    pub ollama_url: Option<Url>,
}

impl Args {
    /// Apply command-line overrides on top of loaded configuration
    pub fn apply(&self, config: &mut Config) {
        if let Some(listen) = self.listen {
            config.server.listen_address = listen;
        }

        if let Some(ref url) = self.ollama_url {
            config.ollama.base_url = url.clone();
        }
    }
}
