//! FinLit relay CLI and REST API entry point.
//!
//! Binary name: `finlit`
//!
//! Parses CLI arguments, resolves configuration, opens the chat store, then
//! dispatches to the requested command or starts the REST API server.

mod cli;
mod http;
mod state;

use std::path::Path;

use anyhow::anyhow;
use clap::Parser;
use clap_complete::generate;

use cli::{Cli, Commands};
use finlit_infra::config::{load_relay_config, resolve_data_dir};
use finlit_observe::tracing_setup::{LogFormat, TracingOptions, init_tracing, shutdown_tracing};
use finlit_types::config::RelayConfig;
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Shell completions don't need logging or app state
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "finlit", &mut std::io::stdout());
        return Ok(());
    }

    let default_filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "info",
        1 => "debug,hyper=info",
        _ => "trace",
    };
    let format: LogFormat = cli.log_format.parse().map_err(|e: String| anyhow!(e))?;
    init_tracing(&TracingOptions {
        default_filter: default_filter.to_string(),
        format,
        enable_otel: cli.otel,
    })
    .map_err(|e| anyhow!("failed to initialize tracing: {e}"))?;

    let data_dir = resolve_data_dir();
    let config = cli.overrides.apply(load_relay_config(&data_dir).await);

    let result = run(cli.command, config, &data_dir).await;

    shutdown_tracing();
    result
}

/// Run a command once tracing and configuration are in place.
async fn run(command: Commands, mut config: RelayConfig, data_dir: &Path) -> anyhow::Result<()> {
    match command {
        Commands::Serve { port, host } => {
            if let Some(port) = port {
                config.port = port;
            }
            if let Some(host) = host {
                config.host = host;
            }
            serve(config, data_dir).await
        }

        Commands::History { limit, json } => {
            let state = AppState::init(config, data_dir).await?;
            cli::history::show_history(&state, limit, json).await
        }

        Commands::Status { json } => {
            let state = AppState::init(config, data_dir).await?;
            cli::status::status(&state, json).await
        }

        Commands::Completions { .. } => unreachable!("handled in main"),
    }
}

/// Open the store and run the HTTP server until Ctrl+C or SIGTERM.
///
/// A store that cannot be opened aborts startup.
async fn serve(config: RelayConfig, data_dir: &Path) -> anyhow::Result<()> {
    let addr = format!("{}:{}", config.host, config.port);
    let ai_service_url = config.ai_service_url.clone();

    let state = AppState::init(config, data_dir).await?;
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!(
        addr = %addr,
        ai_service_url = %ai_service_url,
        timeout_secs = state.relay_service.timeout().as_secs(),
        "FinLit relay listening"
    );

    let router = http::router::build_router(state);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Wait for Ctrl+C or SIGTERM for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
