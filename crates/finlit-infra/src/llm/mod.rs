//! Inference service clients.

pub mod http_client;
