//! Agent config loader (strict parsing).

pub mod schema;

use std::fs;

use airmon_core::error::{AirmonError, Result};

pub use schema::{AgentConfig, AgentSection, SenseAirS8Config, Sm300d2Config, SourcesSection};

pub fn load_from_file(path: &str) -> Result<AgentConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| AirmonError::Io(format!("read config failed: {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<AgentConfig> {
    let cfg: AgentConfig = serde_yaml::from_str(s)
        .map_err(|e| AirmonError::BadConfig(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}
