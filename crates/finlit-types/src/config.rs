//! Relay configuration types.
//!
//! `RelayConfig` represents the optional `config.toml` in the data directory.
//! Every field has a local-development default; CLI flags and environment
//! variables override whatever the file provides.

use serde::{Deserialize, Serialize};

/// Top-level configuration for the relay server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelayConfig {
    /// Address to bind the HTTP listener to.
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Database connection string. `None` means `<data_dir>/finlit.db`.
    #[serde(default)]
    pub database_url: Option<String>,

    /// Upper bound on pooled reader connections.
    #[serde(default = "default_db_max_connections")]
    pub db_max_connections: u32,

    /// Endpoint of the inference service.
    #[serde(default = "default_ai_service_url")]
    pub ai_service_url: String,

    /// Deadline for a single inference call, in seconds.
    #[serde(default = "default_ai_timeout_secs")]
    pub ai_timeout_secs: u64,

    /// Directory of the built frontend, served when it exists.
    #[serde(default = "default_web_dir")]
    pub web_dir: String,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_db_max_connections() -> u32 {
    8
}

fn default_ai_service_url() -> String {
    "http://localhost:5001/chat".to_string()
}

fn default_ai_timeout_secs() -> u64 {
    30
}

fn default_web_dir() -> String {
    "frontend".to_string()
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            database_url: None,
            db_max_connections: default_db_max_connections(),
            ai_service_url: default_ai_service_url(),
            ai_timeout_secs: default_ai_timeout_secs(),
            web_dir: default_web_dir(),
        }
    }
}
