//! Sensor wire-protocol decoders (panic-free).
//!
//! Parsing rules:
//! - Never index (`buf[0]`) — always use `Buf` and `remaining()` checks.
//! - Never `unwrap()` / `expect()` / `panic!()` in production paths.

pub mod lywsd02;
pub mod senseair_s8;
pub mod sm300d2;
