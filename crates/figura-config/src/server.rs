use std::net::SocketAddr;
use std::path::PathBuf;

use serde::Deserialize;

use crate::{cors::CorsConfig, health::HealthConfig};

/// Body limit for design uploads (32 MiB)
const DEFAULT_BODY_LIMIT: usize = 32 << 20;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    #[serde(default = "default_listen_address")]
    pub listen_address: SocketAddr,
    /// Directory that holds uploaded designs while a request is in flight
    #[serde(default = "default_upload_dir")]
    pub upload_dir: PathBuf,
    /// Maximum accepted request body size in bytes
    #[serde(default = "default_body_limit")]
    pub body_limit: usize,
    #[serde(default)]
    pub health: HealthConfig,
    #[serde(default = "default_cors")]
    pub cors: Option<CorsConfig>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_address: default_listen_address(),
            upload_dir: default_upload_dir(),
            body_limit: default_body_limit(),
            health: HealthConfig::default(),
            cors: default_cors(),
        }
    }
}

fn default_listen_address() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 8000))
}

fn default_upload_dir() -> PathBuf {
    PathBuf::from("uploads")
}

#[allow(clippy::missing_const_for_fn)]
fn default_body_limit() -> usize {
    DEFAULT_BODY_LIMIT
}

#[allow(clippy::unnecessary_wraps)]
fn default_cors() -> Option<CorsConfig> {
    Some(CorsConfig::default())
}
