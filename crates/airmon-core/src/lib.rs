//! airmon core: metric data model, fixed-capacity registry, exposition
//! renderer, and sensor frame decoders.
//!
//! This crate defines everything the agent needs that is independent of the
//! runtime: the slot-table registry shared by producer tasks and the scrape
//! handler, the OpenMetrics text renderer, and the panic-free decoders for
//! the supported sensor wire protocols. It intentionally carries no
//! transport or async dependencies so it can be tested in isolation.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! All fallible paths must surface as `AirmonError`/`Result` so the agent
//! does not crash on malformed frames or a degenerate scrape.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod metric;
pub mod protocol;
pub mod registry;
pub mod render;

pub use error::{AirmonError, Result};
pub use metric::{Metric, MetricKind};
pub use registry::Registry;
