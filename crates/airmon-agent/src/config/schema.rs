use serde::Deserialize;

use airmon_core::error::{AirmonError, Result};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AgentConfig {
    pub version: u32,

    #[serde(default)]
    pub agent: AgentSection,

    #[serde(default)]
    pub sources: SourcesSection,
}

impl AgentConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(AirmonError::BadConfig("version must be 1".into()));
        }

        self.agent.validate()?;
        self.sources.validate()?;

        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AgentSection {
    #[serde(default = "default_listen")]
    pub listen: String,

    /// Value of the `host` label on every sample line.
    #[serde(default = "default_hostname")]
    pub hostname: String,

    /// Value of the `instance` label on every sample line.
    #[serde(default = "default_node_id")]
    pub node_id: String,

    #[serde(default = "default_metrics_path")]
    pub metrics_path: String,

    /// Registry slot capacity (hard bound, never grows).
    #[serde(default = "default_capacity")]
    pub capacity: usize,
}

impl Default for AgentSection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            hostname: default_hostname(),
            node_id: default_node_id(),
            metrics_path: default_metrics_path(),
            capacity: default_capacity(),
        }
    }
}

impl AgentSection {
    pub fn validate(&self) -> Result<()> {
        if !(1..=256).contains(&self.capacity) {
            return Err(AirmonError::BadConfig(
                "agent.capacity must be between 1 and 256".into(),
            ));
        }
        if !self.metrics_path.starts_with('/') {
            return Err(AirmonError::BadConfig(
                "agent.metrics_path must start with '/'".into(),
            ));
        }
        Ok(())
    }
}

fn default_listen() -> String {
    "0.0.0.0:9100".into()
}
fn default_hostname() -> String {
    "airmon".into()
}
fn default_node_id() -> String {
    "dev0".into()
}
fn default_metrics_path() -> String {
    "/metrics".into()
}
fn default_capacity() -> usize {
    32
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct SourcesSection {
    #[serde(default)]
    pub sm300d2: Option<Sm300d2Config>,

    #[serde(default)]
    pub senseair_s8: Option<SenseAirS8Config>,
}

impl SourcesSection {
    pub fn validate(&self) -> Result<()> {
        if let Some(c) = &self.sm300d2 {
            c.validate()?;
        }
        if let Some(c) = &self.senseair_s8 {
            c.validate()?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Sm300d2Config {
    pub port: String,

    #[serde(default = "default_ttl_ms")]
    pub ttl_ms: u64,
}

impl Sm300d2Config {
    pub fn validate(&self) -> Result<()> {
        validate_ttl("sources.sm300d2.ttl_ms", self.ttl_ms)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SenseAirS8Config {
    pub port: String,

    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    #[serde(default = "default_ttl_ms")]
    pub ttl_ms: u64,
}

impl SenseAirS8Config {
    pub fn validate(&self) -> Result<()> {
        if !(500..=600_000).contains(&self.poll_interval_ms) {
            return Err(AirmonError::BadConfig(
                "sources.senseair_s8.poll_interval_ms must be between 500 and 600000".into(),
            ));
        }
        validate_ttl("sources.senseair_s8.ttl_ms", self.ttl_ms)?;
        // One missed poll must not blank the series.
        if self.ttl_ms <= self.poll_interval_ms {
            return Err(AirmonError::BadConfig(
                "sources.senseair_s8.ttl_ms must be greater than poll_interval_ms".into(),
            ));
        }
        Ok(())
    }
}

fn validate_ttl(field: &str, ttl_ms: u64) -> Result<()> {
    if !(1000..=600_000).contains(&ttl_ms) {
        return Err(AirmonError::BadConfig(format!(
            "{field} must be between 1000 and 600000"
        )));
    }
    Ok(())
}

fn default_ttl_ms() -> u64 {
    30_000
}
fn default_poll_interval_ms() -> u64 {
    5_000
}
