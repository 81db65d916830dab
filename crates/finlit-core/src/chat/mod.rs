//! Chat persistence port and the relay service built on it.

pub mod repository;
pub mod service;
