//! Inference service abstraction.

pub mod client;
