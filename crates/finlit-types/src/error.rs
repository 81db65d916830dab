use thiserror::Error;

/// Errors from repository operations (used by trait definitions in finlit-core).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database connection error: {0}")]
    Connection(String),

    #[error("query error: {0}")]
    Query(String),
}

/// Failures of the outbound call to the inference service.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DependencyError {
    #[error("inference service timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("inference service unreachable: {0}")]
    Transport(String),

    #[error("inference service returned status {0}")]
    Status(u16),

    #[error("malformed inference reply: {0}")]
    MalformedReply(String),
}

/// Errors surfaced by the relay operation.
///
/// Dependency failures are not errors here: they resolve to a fallback
/// outcome instead.
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("{0}")]
    Validation(String),

    #[error("storage error: {0}")]
    Storage(#[from] RepositoryError),
}
