//! ChatStore trait definition.
//!
//! Append-only persistence for chat exchanges. There are deliberately no
//! update or delete operations.

use finlit_types::chat::{ChatRecord, NewChatRecord};
use finlit_types::error::RepositoryError;

/// Repository trait for chat record persistence.
///
/// Implementations live in finlit-infra (e.g., `SqliteChatStore`).
/// Uses native async fn in traits (RPITIT, Rust 2024 edition).
pub trait ChatStore: Send + Sync {
    /// Persist a new record, stamping it with the current time when the
    /// input carries no timestamp.
    fn append(
        &self,
        record: NewChatRecord,
    ) -> impl std::future::Future<Output = Result<ChatRecord, RepositoryError>> + Send;

    /// The most recent records, oldest first.
    ///
    /// Never returns more than `min(limit, HISTORY_LIMIT)` records.
    fn list_recent(
        &self,
        limit: u32,
    ) -> impl std::future::Future<Output = Result<Vec<ChatRecord>, RepositoryError>> + Send;

    /// Total number of stored records.
    fn count(&self) -> impl std::future::Future<Output = Result<u64, RepositoryError>> + Send;
}
