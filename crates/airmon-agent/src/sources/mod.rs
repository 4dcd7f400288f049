//! Producer source tasks.
//!
//! Each configured sensor gets one source: it owns its serial port on a
//! dedicated blocking thread, hands decoded readings to an async task over
//! a latest-wins `watch` channel, and that task `put`s typed metrics into
//! the registry. Serial failures are logged and retried with bounded
//! exponential backoff; they never take the agent down.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use airmon_core::Registry;

use crate::config::SourcesSection;

pub mod senseair_s8;
pub mod sm300d2;

pub use senseair_s8::SenseAirS8Source;
pub use sm300d2::Sm300d2Source;

/// One sensor source: owns its bus and feeds the registry on its own cadence.
#[async_trait]
pub trait Source: Send + Sync {
    fn name(&self) -> &'static str;
    async fn run(self: Arc<Self>, registry: Arc<Registry>);
}

/// Spawn every source enabled in config onto the runtime.
pub fn spawn_all(sources: &SourcesSection, registry: &Arc<Registry>) {
    let mut enabled: Vec<Arc<dyn Source>> = Vec::new();
    if let Some(cfg) = &sources.sm300d2 {
        enabled.push(Arc::new(Sm300d2Source::new(cfg.clone())));
    }
    if let Some(cfg) = &sources.senseair_s8 {
        enabled.push(Arc::new(SenseAirS8Source::new(cfg.clone())));
    }

    for src in enabled {
        tracing::info!(source = src.name(), "starting source");
        tokio::spawn(src.run(Arc::clone(registry)));
    }
}

/// Backoff before the n-th reopen attempt: 2^n ms, capped near 16s.
pub(crate) fn reopen_delay(retry: u32) -> Duration {
    Duration::from_millis(1u64 << retry.min(14))
}
