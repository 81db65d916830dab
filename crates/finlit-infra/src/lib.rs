//! Infrastructure implementations for the FinLit relay.
//!
//! SQLite chat storage, the HTTP inference client, and configuration loading.
//! Implements the ports defined in `finlit-core`.

pub mod config;
pub mod llm;
pub mod sqlite;
