//! Shared application state for the airmon agent.
//!
//! Owns the single registry instance for the process lifetime and the
//! fixed instance labels derived from config. Cloning is cheap (`Arc`).

use std::sync::Arc;

use airmon_core::render::InstanceLabels;
use airmon_core::Registry;

use crate::config::AgentConfig;

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    cfg: AgentConfig,
    registry: Arc<Registry>,
    labels: InstanceLabels,
}

impl AppState {
    pub fn new(cfg: AgentConfig) -> Self {
        let registry = Arc::new(Registry::new(cfg.agent.capacity));
        let labels = InstanceLabels {
            host: cfg.agent.hostname.clone(),
            node: cfg.agent.node_id.clone(),
        };
        Self {
            inner: Arc::new(AppStateInner {
                cfg,
                registry,
                labels,
            }),
        }
    }

    pub fn cfg(&self) -> &AgentConfig {
        &self.inner.cfg
    }

    pub fn registry(&self) -> Arc<Registry> {
        Arc::clone(&self.inner.registry)
    }

    pub fn labels(&self) -> &InstanceLabels {
        &self.inner.labels
    }
}
