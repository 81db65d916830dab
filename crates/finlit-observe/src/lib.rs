//! Observability setup for the FinLit relay.

pub mod tracing_setup;
