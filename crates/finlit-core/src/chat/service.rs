//! Relay service: forward a message to the inference service and persist
//! the exchange.
//!
//! RelayService coordinates between the ChatStore and the InferenceClient.
//! A failed inference call is not an error: it resolves to
//! [`RelayOutcome::Fallback`] and nothing is written. Only validation and
//! storage failures surface as [`RelayError`].

use std::time::{Duration, Instant};

use finlit_types::chat::{ChatRecord, HISTORY_LIMIT, MESSAGE_REQUIRED, NewChatRecord};
use finlit_types::error::{DependencyError, RelayError, RepositoryError};
use tracing::{debug, info, warn};

use crate::chat::repository::ChatStore;
use crate::llm::client::InferenceClient;

/// Result of a relay call that got past validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelayOutcome {
    /// The service answered and the exchange was stored.
    Answered(ChatRecord),
    /// The service failed; nothing was stored.
    Fallback { cause: DependencyError },
}

/// Orchestrates the relay-and-persist flow.
///
/// Generic over `ChatStore` and `InferenceClient` to maintain clean
/// architecture (finlit-core never depends on finlit-infra).
pub struct RelayService<S: ChatStore, C: InferenceClient> {
    store: S,
    client: C,
    timeout: Duration,
}

impl<S: ChatStore, C: InferenceClient> RelayService<S, C> {
    /// Create a relay service whose inference calls are bounded by `timeout`.
    pub fn new(store: S, client: C, timeout: Duration) -> Self {
        Self {
            store,
            client,
            timeout,
        }
    }

    /// Access the chat store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Access the inference client.
    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Relay one message.
    ///
    /// Makes at most one inference call and at most one store write. A
    /// missing or empty message fails before either happens.
    pub async fn relay(&self, message: Option<&str>) -> Result<RelayOutcome, RelayError> {
        let message = match message {
            Some(m) if !m.is_empty() => m,
            _ => return Err(RelayError::Validation(MESSAGE_REQUIRED.to_string())),
        };

        let start = Instant::now();
        let reply = match tokio::time::timeout(self.timeout, self.client.reply(message)).await {
            Ok(Ok(text)) if !text.is_empty() => text,
            Ok(Ok(_)) => {
                return Ok(self.fallback(
                    DependencyError::MalformedReply("empty response".to_string()),
                    start,
                ));
            }
            Ok(Err(cause)) => return Ok(self.fallback(cause, start)),
            Err(_) => {
                let cause = DependencyError::Timeout {
                    timeout_ms: self.timeout.as_millis() as u64,
                };
                return Ok(self.fallback(cause, start));
            }
        };

        debug!(
            message_len = message.len(),
            response_len = reply.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Inference service answered"
        );

        let record = self.store.append(NewChatRecord::new(message, reply)).await?;
        info!(record_id = %record.id, "Chat exchange stored");

        Ok(RelayOutcome::Answered(record))
    }

    /// The most recent exchanges, oldest first, capped at [`HISTORY_LIMIT`].
    pub async fn history(&self, limit: Option<u32>) -> Result<Vec<ChatRecord>, RepositoryError> {
        let limit = limit.unwrap_or(HISTORY_LIMIT).min(HISTORY_LIMIT);
        self.store.list_recent(limit).await
    }

    /// Total number of stored exchanges.
    pub async fn record_count(&self) -> Result<u64, RepositoryError> {
        self.store.count().await
    }

    fn fallback(&self, cause: DependencyError, start: Instant) -> RelayOutcome {
        warn!(
            endpoint = self.client.endpoint(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            cause = %cause,
            "Inference call failed, returning fallback"
        );
        RelayOutcome::Fallback { cause }
    }
}
