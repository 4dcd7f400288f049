//! Top-level facade crate for airmon.
//!
//! Re-exports the core types and the agent library so users can depend on a single crate.

pub mod core {
    pub use airmon_core::*;
}

pub mod agent {
    pub use airmon_agent::*;
}
