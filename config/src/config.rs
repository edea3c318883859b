use std::path::{Path, PathBuf};
use std::{env, fs, io};

use serde::Deserialize;
use thiserror::Error;

/// Overrides the config file location.
pub const CONFIG_ENV_VAR: &str = "CAPTABLE_CONFIG";
/// Overrides `[display] format`.
pub const FORMAT_ENV_VAR: &str = "CAPTABLE_FORMAT";

const DEFAULT_CURRENCY_SYMBOL: &str = "$";
const DEFAULT_PERCENT_DECIMALS: usize = 2;
const MAX_PERCENT_DECIMALS: usize = 8;

/// Raw `config.toml` contents. Every field is optional.
///
/// ```toml
/// [display]
/// format = "table"
/// currency_symbol = "$"
/// percent_decimals = 2
///
/// [scenario]
/// default_path = "${HOME}/cap/scenario.toml"
/// ```
#[derive(Debug, Default, Deserialize)]
pub struct CaptableConfig {
    pub display: Option<DisplayConfig>,
    pub scenario: Option<ScenarioConfig>,
}

#[derive(Debug, Default, Deserialize)]
pub struct DisplayConfig {
    /// "table" or "json".
    pub format: Option<String>,
    pub currency_symbol: Option<String>,
    pub percent_decimals: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ScenarioConfig {
    /// Scenario file used when a command is given none. `${VAR}` expands.
    pub default_path: Option<String>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to parse config at {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

impl ConfigError {
    #[must_use]
    pub fn path(&self) -> &PathBuf {
        match self {
            ConfigError::Read { path, .. } | ConfigError::Parse { path, .. } => path,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl OutputFormat {
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "table" | "text" => Some(Self::Table),
            "json" => Some(Self::Json),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Table => "table",
            Self::Json => "json",
        }
    }
}

/// Fully resolved display preferences.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplaySettings {
    pub format: OutputFormat,
    pub currency_symbol: String,
    pub percent_decimals: usize,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            currency_symbol: DEFAULT_CURRENCY_SYMBOL.to_string(),
            percent_decimals: DEFAULT_PERCENT_DECIMALS,
        }
    }
}

#[must_use]
pub fn expand_env_vars(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut rest = value;

    while let Some(start) = rest.find("${") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let Some(end) = after.find('}') else {
            out.push_str(&rest[start..]);
            rest = "";
            break;
        };
        let var = &after[..end];
        if !var.is_empty() {
            out.push_str(&env::var(var).unwrap_or_default());
        }
        rest = &after[end + 1..];
    }

    out.push_str(rest);
    out
}

impl CaptableConfig {
    /// Load from [`config_path`]. A missing file is `Ok(None)`.
    pub fn load() -> Result<Option<Self>, ConfigError> {
        match config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(None),
        }
    }

    pub fn load_from(path: &Path) -> Result<Option<Self>, ConfigError> {
        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(path).map_err(|err| {
            tracing::warn!("Failed to read config at {:?}: {}", path, err);
            ConfigError::Read {
                path: path.to_path_buf(),
                source: err,
            }
        })?;

        let config = toml::from_str(&content).map_err(|err| {
            tracing::warn!("Failed to parse config at {:?}: {}", path, err);
            ConfigError::Parse {
                path: path.to_path_buf(),
                source: err,
            }
        })?;
        Ok(Some(config))
    }

    #[must_use]
    pub fn path() -> Option<PathBuf> {
        config_path()
    }

    /// Resolve display preferences: `CAPTABLE_FORMAT`, then the file, then defaults.
    ///
    /// Unknown formats fall back to the default with a warning.
    #[must_use]
    pub fn display_settings(&self) -> DisplaySettings {
        let display = self.display.as_ref();
        let mut settings = DisplaySettings::default();

        let raw_format = env::var(FORMAT_ENV_VAR)
            .ok()
            .or_else(|| display.and_then(|d| d.format.clone()));
        if let Some(raw) = raw_format {
            if let Some(format) = OutputFormat::parse(&raw) {
                settings.format = format;
            } else {
                tracing::warn!("Unknown output format in config: {}", raw);
            }
        }

        if let Some(symbol) = display.and_then(|d| d.currency_symbol.as_deref()) {
            settings.currency_symbol = symbol.to_string();
        }
        if let Some(decimals) = display.and_then(|d| d.percent_decimals) {
            settings.percent_decimals = decimals.min(MAX_PERCENT_DECIMALS);
        }

        settings
    }

    /// The configured default scenario path, with `${VAR}` expanded.
    #[must_use]
    pub fn default_scenario_path(&self) -> Option<PathBuf> {
        let raw = self.scenario.as_ref()?.default_path.as_deref()?;
        let expanded = expand_env_vars(raw);
        if expanded.trim().is_empty() {
            return None;
        }
        Some(PathBuf::from(expanded))
    }
}

/// `$CAPTABLE_CONFIG`, else `~/.captable/config.toml`.
#[must_use]
pub fn config_path() -> Option<PathBuf> {
    if let Some(path) = env::var_os(CONFIG_ENV_VAR).filter(|value| !value.is_empty()) {
        return Some(PathBuf::from(path));
    }
    dirs::home_dir().map(|home| home.join(".captable").join("config.toml"))
}
