//! Relay logic and port trait definitions for the FinLit relay.
//!
//! This crate defines the "ports" (`ChatStore`, `InferenceClient`) that the
//! infrastructure layer implements, and the `RelayService` that drives them.
//! It depends only on `finlit-types` -- never on `finlit-infra` or any
//! database/IO crate.

pub mod chat;
pub mod llm;
