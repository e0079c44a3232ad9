//! Planner settings that can be kept in a TOML file instead of being passed
//! on the command line.

use crate::search::heuristics::HeuristicName;
use crate::search::search_engines::SearchEngineName;
use crate::search::Verbosity;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("weight must be positive, got {0}")]
    InvalidWeight(f64),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct SearchConfig {
    #[serde(default = "default_engine")]
    pub engine: SearchEngineName,
    #[serde(default = "default_heuristic")]
    pub heuristic: HeuristicName,
    /// Heuristic weight of weighted A*.
    #[serde(default = "default_weight")]
    pub weight: f64,
    #[serde(default)]
    pub time_limit_secs: Option<u64>,
    #[serde(default)]
    pub memory_limit_mb: Option<usize>,
    #[serde(default)]
    pub verbosity: Verbosity,
}

fn default_engine() -> SearchEngineName {
    SearchEngineName::Astar
}

fn default_heuristic() -> HeuristicName {
    HeuristicName::Hmax
}

fn default_weight() -> f64 {
    1.0
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            engine: default_engine(),
            heuristic: default_heuristic(),
            weight: default_weight(),
            time_limit_secs: None,
            memory_limit_mb: None,
            verbosity: Verbosity::default(),
        }
    }
}

impl SearchConfig {
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        let config: SearchConfig = toml::from_str(text)?;
        if config.weight <= 0.0 || config.weight.is_nan() {
            return Err(ConfigError::InvalidWeight(config.weight));
        }
        Ok(config)
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        Self::from_toml(&std::fs::read_to_string(path)?)
    }

    pub fn time_limit(&self) -> Option<Duration> {
        self.time_limit_secs.map(Duration::from_secs)
    }
}
