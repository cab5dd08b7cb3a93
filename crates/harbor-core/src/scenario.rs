//! Scenario files: a configuration plus a list of commands.
//!
//! Feature-gated behind `data-loader`. JSON and TOML are supported; the file
//! extension picks the format.
//!
//! ```toml
//! [config.rules]
//! arrival = "keep_onboard"
//!
//! [[commands]]
//! op = "create_port"
//! id = 0
//! lat = 50.45
//! lon = 30.52
//! ```

use crate::command::{Command, Outcome};
use crate::config::{ConfigError, SimConfig};
use crate::sim::{SimError, Simulation};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Errors raised while loading or running a scenario.
#[derive(Debug, thiserror::Error)]
pub enum ScenarioError {
    #[error("unsupported scenario format: {file}")]
    UnsupportedFormat { file: PathBuf },
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("invalid scenario config: {0}")]
    Config(#[from] ConfigError),
    /// A command returned an error; `index` is its position in the list.
    #[error("command {index} failed: {source}")]
    Command { index: usize, source: SimError },
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Supported scenario file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Toml,
}

/// Pick the format from a file extension.
pub fn detect_format(path: &Path) -> Result<Format, ScenarioError> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("json") => Ok(Format::Json),
        Some("toml") => Ok(Format::Toml),
        _ => Err(ScenarioError::UnsupportedFormat {
            file: path.to_path_buf(),
        }),
    }
}

/// A configuration and the commands to run against a fresh simulation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub config: SimConfig,
    #[serde(default)]
    pub commands: Vec<Command>,
}

/// A scenario after running: the final simulation and one outcome per command.
#[derive(Debug)]
pub struct ScenarioRun {
    pub sim: Simulation,
    pub outcomes: Vec<Outcome>,
}

impl Scenario {
    /// Parse and validate a JSON scenario.
    pub fn from_json_str(text: &str) -> Result<Self, ScenarioError> {
        let scenario: Scenario = serde_json::from_str(text)?;
        scenario.config.validate()?;
        Ok(scenario)
    }

    /// Parse and validate a TOML scenario.
    pub fn from_toml_str(text: &str) -> Result<Self, ScenarioError> {
        let scenario: Scenario = toml::from_str(text)?;
        scenario.config.validate()?;
        Ok(scenario)
    }

    /// Read a scenario file, picking the format from its extension.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ScenarioError> {
        let path = path.as_ref();
        let format = detect_format(path)?;
        let text = std::fs::read_to_string(path)?;
        match format {
            Format::Json => Self::from_json_str(&text),
            Format::Toml => Self::from_toml_str(&text),
        }
    }

    /// Build a fresh simulation and apply every command in order.
    pub fn run(&self) -> Result<ScenarioRun, ScenarioError> {
        let mut sim = Simulation::new(self.config);
        let mut outcomes = Vec::with_capacity(self.commands.len());
        for (index, command) in self.commands.iter().enumerate() {
            let outcome = sim
                .apply(command)
                .map_err(|source| ScenarioError::Command { index, source })?;
            outcomes.push(outcome);
        }
        Ok(ScenarioRun { sim, outcomes })
    }
}
