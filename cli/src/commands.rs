//! Command-line definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use captable_config::OutputFormat;
use captable_types::NewInvestor;

/// Startup equity scenario builder
#[derive(Parser, Debug)]
#[command(name = "captable")]
#[command(version)]
#[command(about = "Model ownership changes across SAFEs and priced rounds")]
#[command(long_about = "Build a financing scenario one event at a time and see who owns \
    what after each priced round.\n\n\
    Scenario files are TOML unless their extension is .json. Commands that take a \
    FILE fall back to [scenario] default_path from the config, then to ./scenario.toml.")]
pub struct Cli {
    /// Output format (table, json). Overrides config and CAPTABLE_FORMAT.
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<FormatArg>,

    /// Config file (default: ~/.captable/config.toml)
    #[arg(long, env = "CAPTABLE_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum FormatArg {
    /// Human-readable tables
    Table,
    /// Pretty-printed JSON
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(value: FormatArg) -> Self {
        match value {
            FormatArg::Table => OutputFormat::Table,
            FormatArg::Json => OutputFormat::Json,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a scenario file for a new company
    Init {
        /// Scenario file to create
        file: Option<PathBuf>,
        /// Company name
        #[arg(long)]
        name: String,
        /// Shares held by the founders
        #[arg(long, value_parser = parse_share_count)]
        founders_shares: u64,
        /// Shares outstanding at time zero (>= founder shares)
        #[arg(long, value_parser = parse_share_count)]
        total_shares: u64,
        /// Valuation before any financing
        #[arg(long, value_parser = parse_money)]
        initial_valuation: f64,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Record a SAFE; it converts at the next priced round
    AddSafe {
        file: Option<PathBuf>,
        /// Investor name; repeated names accumulate into one stakeholder
        #[arg(long)]
        investor: String,
        /// Amount invested
        #[arg(long, value_parser = parse_money)]
        amount: f64,
        /// Discount in percent (0-50)
        #[arg(long, value_parser = parse_percent, default_value = "0")]
        discount: f64,
        /// Valuation cap; omit for an uncapped SAFE
        #[arg(long, value_parser = parse_money)]
        cap: Option<f64>,
    },

    /// Commit a priced round, converting every recorded SAFE
    AddRound {
        file: Option<PathBuf>,
        /// Round name, e.g. "Series A"
        #[arg(long)]
        name: String,
        /// Pre-money valuation
        #[arg(long, value_parser = parse_money)]
        pre_money: f64,
        /// Total new money in the round
        #[arg(long, value_parser = parse_money)]
        investment: f64,
        /// New investor as NAME=AMOUNT (repeatable)
        #[arg(long = "investor", value_parser = parse_investor)]
        investors: Vec<NewInvestor>,
    },

    /// Show the cap table, ownership by type and founder dilution
    Show {
        file: Option<PathBuf>,
        /// Also write the report to this path
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Price a round without committing it
    Preview {
        file: Option<PathBuf>,
        /// Round name
        #[arg(long, default_value = "Next round")]
        name: String,
        /// Pre-money valuation
        #[arg(long, value_parser = parse_money)]
        pre_money: f64,
        /// Total new money in the round
        #[arg(long, value_parser = parse_money)]
        investment: f64,
    },
}

impl Commands {
    pub fn file(&self) -> Option<&PathBuf> {
        match self {
            Commands::Init { file, .. }
            | Commands::AddSafe { file, .. }
            | Commands::AddRound { file, .. }
            | Commands::Show { file, .. }
            | Commands::Preview { file, .. } => file.as_ref(),
        }
    }
}

/// Parse an amount like `2000000`, `2,000,000`, `$2.5M` or `750k`.
pub fn parse_money(raw: &str) -> Result<f64, String> {
    let cleaned: String = raw
        .trim()
        .trim_start_matches('$')
        .chars()
        .filter(|c| !matches!(c, ',' | '_'))
        .collect();

    let (number, multiplier) = match cleaned.chars().last() {
        Some('k' | 'K') => (&cleaned[..cleaned.len() - 1], 1e3),
        Some('m' | 'M') => (&cleaned[..cleaned.len() - 1], 1e6),
        Some('b' | 'B') => (&cleaned[..cleaned.len() - 1], 1e9),
        _ => (cleaned.as_str(), 1.0),
    };

    let value: f64 = number
        .trim()
        .parse()
        .map_err(|_| format!("invalid amount: {raw}"))?;
    if !value.is_finite() {
        return Err(format!("amount must be finite: {raw}"));
    }
    Ok(value * multiplier)
}

pub fn parse_percent(raw: &str) -> Result<f64, String> {
    raw.trim()
        .trim_end_matches('%')
        .trim()
        .parse()
        .map_err(|_| format!("invalid percentage: {raw}"))
}

pub fn parse_share_count(raw: &str) -> Result<u64, String> {
    let cleaned: String = raw
        .trim()
        .chars()
        .filter(|c| !matches!(c, ',' | '_'))
        .collect();
    cleaned
        .parse()
        .map_err(|_| format!("invalid share count: {raw}"))
}

/// Parse `NAME=AMOUNT`. The last `=` splits, so names may contain one.
pub fn parse_investor(raw: &str) -> Result<NewInvestor, String> {
    let (name, amount) = raw
        .rsplit_once('=')
        .ok_or_else(|| format!("expected NAME=AMOUNT, got: {raw}"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("investor name missing in: {raw}"));
    }
    Ok(NewInvestor::new(name, parse_money(amount)?))
}
