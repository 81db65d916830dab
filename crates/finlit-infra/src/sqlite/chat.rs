//! SQLite chat store implementation.
//!
//! Implements `ChatStore` from `finlit-core` using sqlx with split read/write
//! pools. Timestamps are stored as fixed-width RFC 3339 strings (microsecond
//! precision, `Z` suffix) so that text order matches time order.

use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use finlit_core::chat::repository::ChatStore;
use finlit_types::chat::{ChatRecord, HISTORY_LIMIT, NewChatRecord};
use finlit_types::error::RepositoryError;
use sqlx::Row;
use uuid::Uuid;

use super::pool::DatabasePool;

/// SQLite-backed implementation of `ChatStore`.
#[derive(Clone)]
pub struct SqliteChatStore {
    pool: DatabasePool,
}

impl SqliteChatStore {
    /// Create a new store backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

// ---------------------------------------------------------------------------
// Private Row type for SQLite-to-domain mapping
// ---------------------------------------------------------------------------

struct ChatRecordRow {
    id: String,
    message: String,
    response: String,
    timestamp: String,
}

impl ChatRecordRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            message: row.try_get("message")?,
            response: row.try_get("response")?,
            timestamp: row.try_get("timestamp")?,
        })
    }

    fn into_record(self) -> Result<ChatRecord, RepositoryError> {
        let id = Uuid::parse_str(&self.id)
            .map_err(|e| RepositoryError::Query(format!("invalid record id: {e}")))?;

        Ok(ChatRecord {
            id,
            message: self.message,
            response: self.response,
            timestamp: parse_datetime(&self.timestamp)?,
        })
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn parse_datetime(s: &str) -> Result<DateTime<Utc>, RepositoryError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| RepositoryError::Query(format!("invalid datetime: {e}")))
}

fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Pool exhaustion and I/O failures mean the store is unreachable; anything
/// else is reported as a failed query.
fn map_sqlx_error(e: sqlx::Error) -> RepositoryError {
    match e {
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
            RepositoryError::Connection(e.to_string())
        }
        other => RepositoryError::Query(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// ChatStore implementation
// ---------------------------------------------------------------------------

impl ChatStore for SqliteChatStore {
    async fn append(&self, record: NewChatRecord) -> Result<ChatRecord, RepositoryError> {
        // Truncate to the stored precision so the returned record matches
        // what a later read yields.
        let timestamp = record.timestamp.unwrap_or_else(Utc::now).trunc_subsecs(6);
        let record = ChatRecord {
            id: Uuid::now_v7(),
            message: record.message,
            response: record.response,
            timestamp,
        };

        sqlx::query("INSERT INTO chat_records (id, message, response, timestamp) VALUES (?, ?, ?, ?)")
            .bind(record.id.to_string())
            .bind(&record.message)
            .bind(&record.response)
            .bind(format_datetime(&record.timestamp))
            .execute(&self.pool.writer)
            .await
            .map_err(map_sqlx_error)?;

        Ok(record)
    }

    async fn list_recent(&self, limit: u32) -> Result<Vec<ChatRecord>, RepositoryError> {
        let limit = limit.min(HISTORY_LIMIT);

        let rows = sqlx::query(
            r#"SELECT id, message, response, timestamp FROM (
                   SELECT id, message, response, timestamp FROM chat_records
                   ORDER BY timestamp DESC, id DESC
                   LIMIT ?
               )
               ORDER BY timestamp ASC, id ASC"#,
        )
        .bind(i64::from(limit))
        .fetch_all(&self.pool.reader)
        .await
        .map_err(map_sqlx_error)?;

        let mut records = Vec::with_capacity(rows.len());
        for row in &rows {
            let record_row = ChatRecordRow::from_row(row).map_err(map_sqlx_error)?;
            records.push(record_row.into_record()?);
        }

        Ok(records)
    }

    async fn count(&self) -> Result<u64, RepositoryError> {
        let row = sqlx::query("SELECT COUNT(*) as cnt FROM chat_records")
            .fetch_one(&self.pool.reader)
            .await
            .map_err(map_sqlx_error)?;

        let count: i64 = row.try_get("cnt").map_err(map_sqlx_error)?;
        Ok(count as u64)
    }
}
