//! InferenceClient trait definition.
//!
//! The single outbound dependency of the relay: send a message, get text
//! back. Deadlines are enforced by the caller, so implementations only need
//! to classify failures.

use finlit_types::error::DependencyError;

/// Trait for inference service backends.
///
/// Implementations live in finlit-infra (e.g., `HttpInferenceClient`).
pub trait InferenceClient: Send + Sync {
    /// Human-readable endpoint description for logs and status output.
    fn endpoint(&self) -> &str;

    /// Send `message` and return the service's reply text.
    fn reply(
        &self,
        message: &str,
    ) -> impl std::future::Future<Output = Result<String, DependencyError>> + Send;
}
