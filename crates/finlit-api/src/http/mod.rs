//! HTTP/REST API layer for the FinLit relay.
//!
//! Axum-based API under `/api/` with `{ "error": ... }` error bodies and
//! permissive CORS.

pub mod error;
pub mod handlers;
pub mod response;
pub mod router;
