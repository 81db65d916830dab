//! Shared domain types for the FinLit relay.
//!
//! Chat records, relay payloads, configuration, and the error enums shared by
//! the core and infrastructure crates.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, thiserror.

pub mod chat;
pub mod config;
pub mod error;
