//! Chat relay and history handlers.
//!
//! Endpoints:
//! - GET  /api/chats - Most recent exchanges, oldest first (max 50)
//! - POST /api/chat  - Relay a message to the inference service

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::http::header::CONTENT_TYPE;

use finlit_types::chat::{ChatRecord, ChatRequest, MESSAGE_REQUIRED};

use crate::http::error::AppError;
use crate::http::response::RelayResponse;
use crate::state::AppState;

/// GET /api/chats - List the most recent chat exchanges.
pub async fn list_chats(State(state): State<AppState>) -> Result<Json<Vec<ChatRecord>>, AppError> {
    let records = state.relay_service.history(None).await?;
    Ok(Json(records))
}

/// POST /api/chat - Relay a message and store the exchange.
pub async fn relay_chat(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<RelayResponse, AppError> {
    let request = parse_chat_request(&headers, &body)?;
    let outcome = state.relay_service.relay(request.message()).await?;
    Ok(outcome.into())
}

/// Decode the request body.
///
/// A body that is not JSON, or carries nothing, reads as a request without a
/// message. Syntax and type errors in a JSON body are rejected with the
/// decoder's message.
fn parse_chat_request(headers: &HeaderMap, body: &[u8]) -> Result<ChatRequest, AppError> {
    if !is_json(headers) {
        return Err(AppError::Validation(MESSAGE_REQUIRED.to_string()));
    }
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(ChatRequest::default());
    }
    Json::<ChatRequest>::from_bytes(body)
        .map(|Json(request)| request)
        .map_err(|rejection| AppError::Validation(rejection.body_text()))
}

/// `application/json` or any `application/*+json` media type.
fn is_json(headers: &HeaderMap) -> bool {
    let Some(essence) = headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .map(|value| value.trim().to_ascii_lowercase())
    else {
        return false;
    };

    match essence.strip_prefix("application/") {
        Some(subtype) => subtype == "json" || subtype.ends_with("+json"),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn json_headers(content_type: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_str(content_type).unwrap());
        headers
    }

    fn validation_message(result: Result<ChatRequest, AppError>) -> String {
        match result {
            Err(AppError::Validation(message)) => message,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_json_media_types() {
        assert!(is_json(&json_headers("application/json")));
        assert!(is_json(&json_headers("application/json; charset=utf-8")));
        assert!(is_json(&json_headers("Application/JSON")));
        assert!(is_json(&json_headers("application/vnd.api+json")));
        assert!(!is_json(&json_headers("text/plain")));
        assert!(!is_json(&json_headers("application/jsonx")));
        assert!(!is_json(&HeaderMap::new()));
    }

    #[test]
    fn test_blank_body_has_no_message() {
        let headers = json_headers("application/json");
        for body in ["", "   ", "\n\t"] {
            let request = parse_chat_request(&headers, body.as_bytes()).unwrap();
            assert_eq!(request.message(), None);
        }
    }

    #[test]
    fn test_non_json_content_type_is_missing_message() {
        let headers = json_headers("text/plain");
        let message = validation_message(parse_chat_request(&headers, br#"{"message": "hi"}"#));
        assert_eq!(message, MESSAGE_REQUIRED);
    }

    #[test]
    fn test_non_string_message_is_rejected() {
        let headers = json_headers("application/json");
        let message = validation_message(parse_chat_request(&headers, br#"{"message": 123}"#));
        assert!(message.contains("invalid type"), "{message}");
    }

    #[test]
    fn test_json_body_is_decoded() {
        let headers = json_headers("application/json");
        let request = parse_chat_request(&headers, br#"{"message": "What is APR?"}"#).unwrap();
        assert_eq!(request.message(), Some("What is APR?"));
    }
}
