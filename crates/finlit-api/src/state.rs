//! Application state wiring the relay service together.
//!
//! AppState holds the concrete service used by both CLI commands and REST
//! handlers. `RelayService` is generic over its ports; AppState pins it to the
//! SQLite store and the HTTP inference client.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use finlit_core::chat::service::RelayService;
use finlit_infra::llm::http_client::HttpInferenceClient;
use finlit_infra::sqlite::chat::SqliteChatStore;
use finlit_infra::sqlite::pool::{DatabasePool, default_database_url, redact_database_url};
use finlit_types::config::RelayConfig;

/// Concrete type alias for the relay service pinned to infra implementations.
pub type ConcreteRelayService = RelayService<SqliteChatStore, HttpInferenceClient>;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub relay_service: Arc<ConcreteRelayService>,
    pub config: Arc<RelayConfig>,
    /// Resolved connection string (the config may leave it unset).
    pub database_url: String,
}

impl AppState {
    /// Connect to the store and wire the relay service.
    ///
    /// Fails if the store cannot be opened; callers treat that as fatal.
    pub async fn init(config: RelayConfig, data_dir: &Path) -> anyhow::Result<Self> {
        let database_url = match &config.database_url {
            Some(url) => url.clone(),
            None => {
                tokio::fs::create_dir_all(data_dir)
                    .await
                    .with_context(|| format!("failed to create {}", data_dir.display()))?;
                default_database_url(data_dir)
            }
        };

        let redacted = redact_database_url(&database_url);
        tracing::info!(database = %redacted, "Connecting to chat store");
        let db_pool = DatabasePool::new(&database_url, config.db_max_connections)
            .await
            .with_context(|| format!("failed to open chat store at {redacted}"))?;
        tracing::info!("Chat store connected");

        let client = HttpInferenceClient::new(config.ai_service_url.clone())
            .context("failed to build inference client")?;

        Ok(Self::from_parts(config, database_url, db_pool, client))
    }

    /// Assemble state from already-constructed parts.
    pub fn from_parts(
        config: RelayConfig,
        database_url: String,
        db_pool: DatabasePool,
        client: HttpInferenceClient,
    ) -> Self {
        let relay_service = RelayService::new(
            SqliteChatStore::new(db_pool),
            client,
            Duration::from_secs(config.ai_timeout_secs),
        );

        Self {
            relay_service: Arc::new(relay_service),
            config: Arc::new(config),
            database_url,
        }
    }
}
