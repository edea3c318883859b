//! captable CLI - Binary entry point.
//!
//! # Architecture
//!
//! The CLI is the input and output collaborator around [`captable_engine`]:
//! it parses and validates user input, keeps the scenario file up to date
//! through [`captable_config`], and renders engine results.
//!
//! ```text
//! main() -> Cli::parse() -> handler::run(cli)
//!                               |
//!             load config -> resolve DisplaySettings
//!                               |
//!     init | add-safe | add-round  -> mutate Scenario -> save_scenario
//!     show | preview               -> compute -> Renderer / JSON -> stdout (+ --output)
//! ```
//!
//! Logs go to stderr so tables and JSON on stdout stay pipeable.

mod commands;
mod handler;
mod render;

use std::io;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::commands::Cli;

fn init_tracing(verbose: bool) {
    let default_directive = if verbose { "debug" } else { "warn" };
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_directive))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr).with_target(false))
        .with(env_filter)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match handler::run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::debug!("Command failed: {err:?}");
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
