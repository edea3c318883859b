//! Configuration and scenario files for captable.
//!
//! - [`CaptableConfig`]: user preferences from `~/.captable/config.toml`,
//!   resolved into [`DisplaySettings`] at the boundary.
//! - [`load_scenario`] / [`save_scenario`]: the scenario file a user edits
//!   through the CLI, TOML by default and JSON by extension.

mod config;
mod scenario;

pub use config::{
    CONFIG_ENV_VAR, CaptableConfig, ConfigError, DisplayConfig, DisplaySettings, FORMAT_ENV_VAR,
    OutputFormat, ScenarioConfig, config_path, expand_env_vars,
};
pub use scenario::{
    ScenarioError, ScenarioFormat, load_scenario, parse_scenario, render_scenario, save_scenario,
};
