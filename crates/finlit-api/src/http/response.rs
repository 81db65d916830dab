//! Response bodies for the relay endpoint.
//!
//! ```json
//! { "response": "..." }                     // 200
//! { "error": "...", "response": "..." }     // 500, inference service failed
//! ```

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use finlit_core::chat::service::RelayOutcome;
use finlit_types::chat::{ChatReply, FallbackReply};

/// What `POST /api/chat` sends back once validation has passed.
#[derive(Debug)]
pub enum RelayResponse {
    Answered(ChatReply),
    /// The fault lies downstream, so this is a server error.
    Fallback(FallbackReply),
}

impl From<RelayOutcome> for RelayResponse {
    fn from(outcome: RelayOutcome) -> Self {
        match outcome {
            RelayOutcome::Answered(record) => RelayResponse::Answered(ChatReply {
                response: record.response,
            }),
            RelayOutcome::Fallback { .. } => RelayResponse::Fallback(FallbackReply::default()),
        }
    }
}

impl IntoResponse for RelayResponse {
    fn into_response(self) -> Response {
        match self {
            RelayResponse::Answered(reply) => (StatusCode::OK, Json(reply)).into_response(),
            RelayResponse::Fallback(reply) => {
                (StatusCode::INTERNAL_SERVER_ERROR, Json(reply)).into_response()
            }
        }
    }
}
