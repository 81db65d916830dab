//! Axum router configuration with middleware.
//!
//! Relay routes live under `/api/`. Middleware: CORS, tracing.
//!
//! When the configured web directory exists, the built frontend is served
//! from it. API routes take priority; unknown paths fall through to the
//! frontend's `index.html`. If the directory does not exist, only the API is
//! served.

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::state::AppState;

/// Build the complete API router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        .route("/chats", get(handlers::chat::list_chats))
        .route("/chat", post(handlers::chat::relay_chat));

    let web_dir = state.config.web_dir.clone();

    let mut router = Router::new()
        .nest("/api", api_routes)
        .route("/health", get(health_check))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    if std::path::Path::new(&web_dir).exists() {
        let index_path = format!("{}/index.html", web_dir);
        let serve_dir = ServeDir::new(&web_dir).fallback(ServeFile::new(index_path));
        router = router.fallback_service(serve_dir);
        tracing::info!(path = %web_dir, "Frontend static file serving enabled");
    }

    router
}

/// GET /health - Liveness check; touches neither the store nor the inference service.
async fn health_check() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use axum::Json;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode};
    use serde_json::{Value, json};
    use tempfile::TempDir;
    use tower::ServiceExt;

    use finlit_infra::llm::http_client::HttpInferenceClient;
    use finlit_infra::sqlite::pool::{DatabasePool, default_database_url};
    use finlit_types::chat::{FALLBACK_ERROR, FALLBACK_RESPONSE};
    use finlit_types::config::RelayConfig;

    use super::*;

    /// Start an in-process stand-in for the inference service.
    async fn spawn_inference_stub() -> String {
        let app = Router::new()
            .route(
                "/ok",
                post(|Json(_): Json<Value>| async {
                    Json(json!({ "response": "Annual Percentage Rate..." }))
                }),
            )
            .route("/down", post(|| async { StatusCode::INTERNAL_SERVER_ERROR }))
            .route("/garbage", post(|| async { "<html>oops</html>" }))
            .route(
                "/slow",
                post(|| async {
                    tokio::time::sleep(Duration::from_secs(5)).await;
                    Json(json!({ "response": "too late" }))
                }),
            );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    async fn test_app(tmp: &TempDir, inference_path: &str) -> (Router, AppState) {
        let base = spawn_inference_stub().await;
        let config = RelayConfig {
            ai_service_url: format!("{base}{inference_path}"),
            ai_timeout_secs: 1,
            web_dir: tmp.path().join("no-frontend").display().to_string(),
            ..RelayConfig::default()
        };

        let database_url = default_database_url(tmp.path());
        let pool = DatabasePool::new(&database_url, 2).await.unwrap();
        let client = HttpInferenceClient::new(config.ai_service_url.clone()).unwrap();
        let state = AppState::from_parts(config, database_url, pool, client);

        (build_router(state.clone()), state)
    }

    fn post_chat(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/chat")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    async fn stored(state: &AppState) -> u64 {
        state.relay_service.record_count().await.unwrap()
    }

    #[tokio::test]
    async fn test_relay_success_returns_response_and_stores_record() {
        let tmp = TempDir::new().unwrap();
        let (app, state) = test_app(&tmp, "/ok").await;

        let (status, body) = send(&app, post_chat(r#"{"message": "What is APR?"}"#)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "response": "Annual Percentage Rate..." }));

        let (status, chats) = send(&app, get_request("/api/chats")).await;
        assert_eq!(status, StatusCode::OK);
        let chats = chats.as_array().unwrap();
        assert_eq!(chats.len(), 1);
        assert_eq!(chats[0]["message"], "What is APR?");
        assert_eq!(chats[0]["response"], "Annual Percentage Rate...");
        assert!(chats[0]["timestamp"].is_string());
        assert_eq!(stored(&state).await, 1);
    }

    #[tokio::test]
    async fn test_relay_missing_message_is_bad_request() {
        let tmp = TempDir::new().unwrap();
        let (app, state) = test_app(&tmp, "/ok").await;

        let (status, body) = send(&app, post_chat("{}")).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "Message required" }));
        assert_eq!(stored(&state).await, 0);
    }

    #[tokio::test]
    async fn test_relay_empty_message_is_bad_request() {
        let tmp = TempDir::new().unwrap();
        let (app, state) = test_app(&tmp, "/ok").await;

        let (status, body) = send(&app, post_chat(r#"{"message": ""}"#)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Message required");
        assert_eq!(stored(&state).await, 0);
    }

    #[tokio::test]
    async fn test_relay_without_json_body_is_bad_request() {
        let tmp = TempDir::new().unwrap();
        let (app, state) = test_app(&tmp, "/ok").await;
        let request = Request::builder()
            .method("POST")
            .uri("/api/chat")
            .body(Body::empty())
            .unwrap();

        let (status, body) = send(&app, request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Message required");
        assert_eq!(stored(&state).await, 0);
    }

    #[tokio::test]
    async fn test_relay_empty_json_body_is_missing_message() {
        let tmp = TempDir::new().unwrap();
        let (app, state) = test_app(&tmp, "/ok").await;

        let (status, body) = send(&app, post_chat("")).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "Message required" }));
        assert_eq!(stored(&state).await, 0);
    }

    #[tokio::test]
    async fn test_relay_non_string_message_is_bad_request() {
        let tmp = TempDir::new().unwrap();
        let (app, state) = test_app(&tmp, "/ok").await;

        let (status, body) = send(&app, post_chat(r#"{"message": 123}"#)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("invalid type"));
        assert_eq!(stored(&state).await, 0);
    }

    #[tokio::test]
    async fn test_relay_malformed_json_is_bad_request() {
        let tmp = TempDir::new().unwrap();
        let (app, _state) = test_app(&tmp, "/ok").await;

        let (status, body) = send(&app, post_chat(r#"{"message": "#)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn test_relay_dependency_failures_return_fallback() {
        for path in ["/down", "/garbage", "/missing-route"] {
            let tmp = TempDir::new().unwrap();
            let (app, state) = test_app(&tmp, path).await;

            let (status, body) = send(&app, post_chat(r#"{"message": "What is APR?"}"#)).await;

            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "path {path}");
            assert_eq!(
                body,
                json!({ "error": FALLBACK_ERROR, "response": FALLBACK_RESPONSE })
            );
            assert_eq!(stored(&state).await, 0);
        }
    }

    #[tokio::test]
    async fn test_relay_timeout_returns_fallback() {
        let tmp = TempDir::new().unwrap();
        let (app, state) = test_app(&tmp, "/slow").await;

        let (status, body) = send(&app, post_chat(r#"{"message": "What is APR?"}"#)).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["response"], FALLBACK_RESPONSE);
        assert_eq!(stored(&state).await, 0);
    }

    #[tokio::test]
    async fn test_list_chats_is_capped_and_repeatable() {
        let tmp = TempDir::new().unwrap();
        let (app, _state) = test_app(&tmp, "/ok").await;
        for i in 0..55 {
            let (status, _) = send(&app, post_chat(&format!(r#"{{"message": "q{i}"}}"#))).await;
            assert_eq!(status, StatusCode::OK);
        }

        let (_, first) = send(&app, get_request("/api/chats")).await;
        let (_, second) = send(&app, get_request("/api/chats")).await;

        let chats = first.as_array().unwrap();
        assert_eq!(chats.len(), 50);
        assert_eq!(chats[0]["message"], "q5");
        assert_eq!(chats[49]["message"], "q54");
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_list_chats_empty() {
        let tmp = TempDir::new().unwrap();
        let (app, _state) = test_app(&tmp, "/ok").await;

        let (status, body) = send(&app, get_request("/api/chats")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([]));
    }

    #[tokio::test]
    async fn test_health_check() {
        let tmp = TempDir::new().unwrap();
        let (app, _state) = test_app(&tmp, "/ok").await;

        let (status, body) = send(&app, get_request("/health")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
    }

    #[tokio::test]
    async fn test_frontend_served_when_present() {
        let tmp = TempDir::new().unwrap();
        let web_dir = tmp.path().join("web");
        std::fs::create_dir_all(&web_dir).unwrap();
        std::fs::write(web_dir.join("index.html"), "<h1>FinLit</h1>").unwrap();

        let (_, state) = test_app(&tmp, "/ok").await;
        let mut config = (*state.config).clone();
        config.web_dir = web_dir.display().to_string();
        let state = AppState {
            config: std::sync::Arc::new(config),
            ..state
        };
        let app = build_router(state);

        let response = app.oneshot(get_request("/some/client/route")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"<h1>FinLit</h1>");
    }
}
