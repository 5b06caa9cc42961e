//! Loading configuration from JSON or YAML files
//!
//! Both formats go through `serde_json::Value` first so that the raw
//! validation report can name every problem at once, not only the first
//! one a deserializer trips over.

use super::{validate_config, ScenarioSimulationConfig, SimulationOptions};
use crate::error::ScenarioError;
use serde_json::Value;
use std::fs;
use std::path::Path;

/// On-disk config format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Yaml,
}

impl ConfigFormat {
    /// Pick a format from the file extension (`.yaml`/`.yml` → YAML, else JSON)
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                ConfigFormat::Yaml
            }
            _ => ConfigFormat::Json,
        }
    }
}

fn parse_value(text: &str, format: ConfigFormat) -> Result<Value, ScenarioError> {
    match format {
        ConfigFormat::Json => {
            serde_json::from_str(text).map_err(|e| ScenarioError::Parse(e.to_string()))
        }
        ConfigFormat::Yaml => {
            serde_yaml::from_str(text).map_err(|e| ScenarioError::Parse(e.to_string()))
        }
    }
}

fn read_file(path: &Path) -> Result<String, ScenarioError> {
    fs::read_to_string(path).map_err(|source| ScenarioError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Parse and validate a config document
pub fn parse_config(text: &str, format: ConfigFormat) -> Result<ScenarioSimulationConfig, ScenarioError> {
    let raw = parse_value(text, format)?;
    validate_config(&raw).into_result()?;

    let config: ScenarioSimulationConfig = serde_json::from_value(raw)?;
    config.validate().into_result()?;

    tracing::debug!(
        challenge_id = %config.challenge_id,
        duration = config.duration,
        "parsed scenario config"
    );
    Ok(config)
}

/// Read a config file, choosing the format from its extension
pub fn load_config(path: impl AsRef<Path>) -> Result<ScenarioSimulationConfig, ScenarioError> {
    let path = path.as_ref();
    let text = read_file(path)?;
    parse_config(&text, ConfigFormat::from_path(path))
}

/// Read factory options (all fields optional) from a file
pub fn load_options(path: impl AsRef<Path>) -> Result<SimulationOptions, ScenarioError> {
    let path = path.as_ref();
    let text = read_file(path)?;
    let raw = parse_value(&text, ConfigFormat::from_path(path))?;
    Ok(serde_json::from_value(raw)?)
}
