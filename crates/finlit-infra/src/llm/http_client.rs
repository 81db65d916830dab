//! HttpInferenceClient -- concrete [`InferenceClient`] over plain JSON/HTTP.
//!
//! Posts `{"message": ...}` to the configured endpoint and expects
//! `{"response": "..."}` back. The overall deadline is applied by the relay
//! service; this client only bounds connection setup.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use finlit_core::llm::client::InferenceClient;
use finlit_types::error::DependencyError;

/// Upper bound on establishing a TCP/TLS connection to the service.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Serialize)]
struct InferenceRequest<'a> {
    message: &'a str,
}

#[derive(Debug, Deserialize)]
struct InferenceReply {
    #[serde(default)]
    response: Option<String>,
}

/// Inference client for a single JSON endpoint.
pub struct HttpInferenceClient {
    client: reqwest::Client,
    url: String,
}

impl HttpInferenceClient {
    /// Create a client for `url`.
    pub fn new(url: impl Into<String>) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .build()?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }

    /// Classify a reqwest failure into the relay's dependency taxonomy.
    fn classify(err: reqwest::Error) -> DependencyError {
        if err.is_timeout() {
            DependencyError::Timeout {
                timeout_ms: CONNECT_TIMEOUT.as_millis() as u64,
            }
        } else if err.is_decode() {
            DependencyError::MalformedReply(err.to_string())
        } else {
            DependencyError::Transport(err.to_string())
        }
    }
}

impl InferenceClient for HttpInferenceClient {
    fn endpoint(&self) -> &str {
        &self.url
    }

    async fn reply(&self, message: &str) -> Result<String, DependencyError> {
        let response = self
            .client
            .post(&self.url)
            .json(&InferenceRequest { message })
            .send()
            .await
            .map_err(Self::classify)?;

        let status = response.status();
        if !status.is_success() {
            tracing::debug!(status = status.as_u16(), url = %self.url, "Inference service returned error status");
            return Err(DependencyError::Status(status.as_u16()));
        }

        let body: InferenceReply = response.json().await.map_err(Self::classify)?;

        match body.response {
            Some(text) if !text.is_empty() => Ok(text),
            Some(_) => Err(DependencyError::MalformedReply("empty `response` field".to_string())),
            None => Err(DependencyError::MalformedReply("missing `response` field".to_string())),
        }
    }
}
