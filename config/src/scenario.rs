//! Scenario files on disk.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use captable_types::{Scenario, ValidationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScenarioFormat {
    Toml,
    Json,
}

impl ScenarioFormat {
    /// JSON for a `.json` extension, TOML for anything else.
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Toml,
        }
    }
}

#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("failed to read scenario {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to write scenario {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },
    #[error("invalid TOML scenario: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("invalid JSON scenario: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to serialize scenario: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("scenario does not satisfy the input contract: {0}")]
    Invalid(#[from] ValidationError),
}

/// Parse and validate scenario text.
pub fn parse_scenario(text: &str, format: ScenarioFormat) -> Result<Scenario, ScenarioError> {
    let scenario: Scenario = match format {
        ScenarioFormat::Toml => toml::from_str(text)?,
        ScenarioFormat::Json => serde_json::from_str(text)?,
    };
    scenario.validate()?;
    Ok(scenario)
}

pub fn render_scenario(
    scenario: &Scenario,
    format: ScenarioFormat,
) -> Result<String, ScenarioError> {
    let mut text = match format {
        ScenarioFormat::Toml => toml::to_string_pretty(scenario)?,
        ScenarioFormat::Json => serde_json::to_string_pretty(scenario)?,
    };
    if !text.ends_with('\n') {
        text.push('\n');
    }
    Ok(text)
}

/// Read, parse and validate the scenario at `path`.
pub fn load_scenario(path: &Path) -> Result<Scenario, ScenarioError> {
    captable_utils::recover_bak_file(path);
    let text = fs::read_to_string(path).map_err(|source| ScenarioError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let scenario = parse_scenario(&text, ScenarioFormat::from_path(path))?;
    tracing::debug!(
        path = %path.display(),
        safes = scenario.safe_count(),
        rounds = scenario.round_count(),
        "Loaded scenario"
    );
    Ok(scenario)
}

/// Atomically write `scenario` to `path` in the format its extension implies.
pub fn save_scenario(path: &Path, scenario: &Scenario) -> Result<(), ScenarioError> {
    let text = render_scenario(scenario, ScenarioFormat::from_path(path))?;
    captable_utils::atomic_write(path, text.as_bytes()).map_err(|source| ScenarioError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!(path = %path.display(), "Saved scenario");
    Ok(())
}
