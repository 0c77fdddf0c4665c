//! Command line host for `bdd-runner`.
//!
//! A test binary links its feature implementations (registered with
//! [`bdd_runner::feature!`]) and hands control to [`main`]:
//!
//! ```no_run
//! use std::process::ExitCode;
//!
//! fn main() -> ExitCode {
//!     bdd_runner_cli::main(&bdd_runner::InventoryRegistry)
//! }
//! ```
//!
//! Exit codes: `0` when every feature passed, `1` when at least one scenario
//! failed, `2` for configuration and other fatal errors.

pub mod cli;
pub mod config;
pub mod discovery;
pub mod error;
pub mod logging;

use std::io::{self, Write};
use std::process::ExitCode;

use bdd_runner::{GherkinDocuments, ImplementationResolver, JsonReporter, Suite, TextReporter};
use clap::Parser;
use eyre::Result;
use tracing::info;

use crate::cli::Args;
use crate::config::{OutputFormat, RunnerConfig};
use crate::discovery::discover_features;
use crate::logging::init_logging;

/// Exit code for a run in which some scenario failed.
pub const EXIT_FAILURE: u8 = 1;
/// Exit code for configuration errors and fatal run errors.
pub const EXIT_FATAL: u8 = 2;

/// Parse the process arguments, run the selected features and map the
/// outcome to an exit code.
#[must_use]
pub fn main(resolver: &dyn ImplementationResolver) -> ExitCode {
    let args = Args::parse();

    let config = match RunnerConfig::from_env() {
        Ok(config) => args.apply_to(config),
        Err(e) => {
            init_logging(&RunnerConfig::default());
            tracing::error!(error = %e, "invalid configuration");
            return ExitCode::from(EXIT_FATAL);
        }
    };
    init_logging(&config);

    info!(version = env!("CARGO_PKG_VERSION"), "starting bdd-runner");

    let stdout = io::stdout();
    match run(&config, &args.identifiers, resolver, &mut stdout.lock()) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(EXIT_FAILURE),
        Err(e) => {
            tracing::error!(error = %format!("{e:#}"), "run aborted");
            ExitCode::from(EXIT_FATAL)
        }
    }
}

/// Run `identifiers`, or every discovered feature when empty, writing the
/// report to `out`.
///
/// Returns `true` when every feature passed.
///
/// # Errors
///
/// Returns an error when feature discovery fails or the run hits a fatal
/// error such as a parse failure, an unresolved feature or a failing hook.
pub fn run(
    config: &RunnerConfig,
    identifiers: &[String],
    resolver: &dyn ImplementationResolver,
    out: &mut dyn Write,
) -> Result<bool> {
    let identifiers = if identifiers.is_empty() {
        discover_features(&config.features_dir)?
            .iter()
            .map(|path| path.display().to_string())
            .collect()
    } else {
        identifiers.to_vec()
    };
    if identifiers.is_empty() {
        tracing::warn!(dir = %config.features_dir.display(), "no feature files found");
    }

    let suite = Suite::new(identifiers).fail_fast(config.fail_fast);
    let success = match config.format {
        OutputFormat::Text => {
            suite.run_with(&mut TextReporter::new(out), &GherkinDocuments, resolver)?
        }
        OutputFormat::Json => {
            suite.run_with(&mut JsonReporter::new(out), &GherkinDocuments, resolver)?
        }
    };
    Ok(success)
}
