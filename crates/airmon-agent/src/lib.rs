//! airmon agent library entry.
//!
//! This crate wires the config, registry, sensor source tasks, and the
//! HTTP exposition endpoint into a running agent. It is intended to be
//! consumed by the binary (`main.rs`) and by integration tests.

pub mod app_state;
pub mod config;
pub mod ops;
pub mod router;
pub mod sources;
