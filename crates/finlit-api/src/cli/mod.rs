//! CLI command definitions for the `finlit` binary.
//!
//! Uses clap derive macros for argument parsing. Every setting can also come
//! from the environment or from `config.toml` in the data directory; flags
//! win over the environment, which wins over the file.

pub mod history;
pub mod status;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

use finlit_types::config::RelayConfig;

/// Relay chat messages to an AI service and keep the history.
#[derive(Parser)]
#[command(name = "finlit", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for debug, -vv for trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Log line format: pretty or json.
    #[arg(long, global = true, env = "FINLIT_LOG_FORMAT", default_value = "pretty")]
    pub log_format: String,

    /// Export spans to stdout via OpenTelemetry.
    #[arg(long, global = true)]
    pub otel: bool,

    #[command(flatten)]
    pub overrides: ConfigOverrides,

    #[command(subcommand)]
    pub command: Commands,
}

/// Settings that override `config.toml`.
#[derive(Args, Debug, Default)]
pub struct ConfigOverrides {
    /// Database connection string.
    #[arg(long, global = true, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Maximum pooled reader connections.
    #[arg(long, global = true, env = "DB_MAX_CONNECTIONS")]
    pub db_max_connections: Option<u32>,

    /// Inference service endpoint.
    #[arg(long, global = true, env = "AI_SERVICE_URL")]
    pub ai_service_url: Option<String>,

    /// Inference call deadline in seconds.
    #[arg(long, global = true, env = "AI_TIMEOUT_SECS")]
    pub ai_timeout_secs: Option<u64>,

    /// Directory of the built frontend.
    #[arg(long, global = true, env = "FINLIT_WEB_DIR")]
    pub web_dir: Option<String>,
}

impl ConfigOverrides {
    /// Layer these overrides on top of a loaded config.
    pub fn apply(self, mut config: RelayConfig) -> RelayConfig {
        if let Some(url) = self.database_url {
            config.database_url = Some(url);
        }
        if let Some(max) = self.db_max_connections {
            config.db_max_connections = max;
        }
        if let Some(url) = self.ai_service_url {
            config.ai_service_url = url;
        }
        if let Some(secs) = self.ai_timeout_secs {
            config.ai_timeout_secs = secs;
        }
        if let Some(dir) = self.web_dir {
            config.web_dir = dir;
        }
        config
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the REST API server.
    Serve {
        /// Port to listen on.
        #[arg(short, long, env = "PORT")]
        port: Option<u16>,

        /// Address to bind to.
        #[arg(long, env = "FINLIT_HOST")]
        host: Option<String>,
    },

    /// Show the most recent chat exchanges.
    History {
        /// Number of exchanges to show (at most 50).
        #[arg(short = 'n', long)]
        limit: Option<u32>,

        /// Output machine-readable JSON.
        #[arg(long)]
        json: bool,
    },

    /// Show configuration and store statistics.
    Status {
        /// Output machine-readable JSON.
        #[arg(long)]
        json: bool,
    },

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}
