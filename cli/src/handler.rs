//! Command handlers.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use tracing::{info, warn};

use captable_config::{CaptableConfig, DisplaySettings, OutputFormat, load_scenario, save_scenario};
use captable_engine::{compute_scenario, preview_round};
use captable_types::{
    Company, NewInvestor, RoundCandidate, RoundTerms, SafeTerms, Scenario,
};

use crate::commands::{Cli, Commands};
use crate::render::{Renderer, group_thousands, preview_json, report_json};

const FALLBACK_SCENARIO_PATH: &str = "scenario.toml";

pub fn run(cli: Cli) -> Result<()> {
    let config = load_config(cli.config.as_deref());
    let mut settings = config.display_settings();
    if let Some(format) = cli.format {
        settings.format = format.into();
    }

    let path = resolve_scenario_path(cli.command.file(), &config);
    info!(path = %path.display(), format = settings.format.as_str(), "Running command");

    match cli.command {
        Commands::Init {
            name,
            founders_shares,
            total_shares,
            initial_valuation,
            force,
            ..
        } => init(
            &path,
            Company::new(name, founders_shares, total_shares, initial_valuation),
            force,
        ),
        Commands::AddSafe {
            investor,
            amount,
            discount,
            cap,
            ..
        } => {
            let mut terms = SafeTerms::new(investor, amount, discount);
            terms.valuation_cap = cap;
            add_safe(&path, terms, &settings)
        }
        Commands::AddRound {
            name,
            pre_money,
            investment,
            investors,
            ..
        } => add_round(&path, name, pre_money, investment, investors, &settings),
        Commands::Show { output, .. } => show(&path, output.as_deref(), &settings),
        Commands::Preview {
            name,
            pre_money,
            investment,
            ..
        } => preview(&path, RoundTerms::new(name, pre_money, investment), &settings),
    }
}

/// A broken config is reported and then ignored.
fn load_config(explicit: Option<&Path>) -> CaptableConfig {
    let loaded = match explicit {
        Some(path) => CaptableConfig::load_from(path),
        None => CaptableConfig::load(),
    };
    match loaded {
        Ok(config) => config.unwrap_or_default(),
        Err(err) => {
            warn!(path = %err.path().display(), "Ignoring config: {err}");
            eprintln!("Warning: {err}; using defaults");
            CaptableConfig::default()
        }
    }
}

fn resolve_scenario_path(explicit: Option<&PathBuf>, config: &CaptableConfig) -> PathBuf {
    explicit
        .cloned()
        .or_else(|| config.default_scenario_path())
        .unwrap_or_else(|| PathBuf::from(FALLBACK_SCENARIO_PATH))
}

fn load(path: &Path) -> Result<Scenario> {
    load_scenario(path).with_context(|| format!("could not load scenario {}", path.display()))
}

fn save(path: &Path, scenario: &Scenario) -> Result<()> {
    save_scenario(path, scenario)
        .with_context(|| format!("could not save scenario {}", path.display()))
}

fn init(path: &Path, company: Company, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!(
            "{} already exists; pass --force to overwrite it",
            path.display()
        );
    }
    company.validate().context("invalid company")?;

    let founders = group_thousands(company.founders_shares as f64);
    let name = company.name.clone();
    save(path, &Scenario::new(company))?;
    println!(
        "{name} configured with {founders} founder shares ({})",
        path.display()
    );
    Ok(())
}

fn add_safe(path: &Path, terms: SafeTerms, settings: &DisplaySettings) -> Result<()> {
    terms.validate().context("invalid SAFE")?;
    let mut scenario = load(path)?;

    let renderer = Renderer::new(settings);
    let line = format!("{} - {}", terms.investor_name, renderer.money(terms.amount));
    let id = scenario.add_safe(terms);
    save(path, &scenario)?;

    info!(%id, "Recorded SAFE");
    println!("SAFE added: {line}");
    Ok(())
}

fn add_round(
    path: &Path,
    name: String,
    pre_money: f64,
    investment: f64,
    investors: Vec<NewInvestor>,
    settings: &DisplaySettings,
) -> Result<()> {
    let mut terms = RoundTerms::new(name, pre_money, investment);
    terms.new_investors = investors;
    terms.validate().context("invalid pricing round")?;

    let allocated: f64 = terms.new_investors.iter().map(|inv| inv.investment).sum();
    if !terms.new_investors.is_empty() && (allocated - terms.investment).abs() > 0.5 {
        warn!(
            allocated,
            investment = terms.investment,
            "New investor amounts do not add up to the round total"
        );
    }

    let mut scenario = load(path)?;
    let pending = scenario.safes.iter().filter(|safe| !safe.converted).count();

    let renderer = Renderer::new(settings);
    let line = format!("{} - {} raised", terms.name, renderer.money(terms.investment));
    let id = scenario.add_pricing_round(terms);
    save(path, &scenario)?;

    info!(%id, converted = pending, "Committed pricing round");
    println!("Pricing round added: {line}");
    if pending > 0 {
        println!("{pending} SAFE(s) converted");
    }
    Ok(())
}

fn show(path: &Path, output: Option<&Path>, settings: &DisplaySettings) -> Result<()> {
    let scenario = load(path)?;
    let outcome = compute_scenario(&scenario);

    let mut text = match settings.format {
        OutputFormat::Table => Renderer::new(settings).report(&scenario, &outcome),
        OutputFormat::Json => {
            report_json(&scenario, &outcome).context("could not encode report")?
        }
    };
    if !text.ends_with('\n') {
        text.push('\n');
    }

    print!("{text}");
    if let Some(output) = output {
        captable_utils::atomic_write(output, text.as_bytes())
            .with_context(|| format!("could not write report to {}", output.display()))?;
        info!(path = %output.display(), "Report written");
    }
    Ok(())
}

fn preview(path: &Path, terms: RoundTerms, settings: &DisplaySettings) -> Result<()> {
    terms.validate().context("invalid pricing round")?;
    let scenario = load(path)?;
    let candidate = RoundCandidate::new(terms.name, terms.pre_money_valuation, terms.investment);

    let result = preview_round(&scenario.company, &scenario.safes, &candidate);
    match settings.format {
        OutputFormat::Table => {
            print!(
                "{}",
                Renderer::new(settings).preview(&scenario.company, &candidate, &result)
            );
        }
        OutputFormat::Json => {
            println!(
                "{}",
                preview_json(&candidate, &result).context("could not encode preview")?
            );
        }
    }
    Ok(())
}
