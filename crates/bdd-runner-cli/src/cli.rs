//! Command line arguments.

use std::path::PathBuf;

use clap::Parser;

use crate::config::{LogLevel, OutputFormat, RunnerConfig};

/// Run Gherkin features against their registered implementations.
#[derive(Parser, Debug, Default, Clone, PartialEq, Eq)]
#[command(version, about)]
pub struct Args {
    /// Feature identifiers, each a path optionally followed by `:<line>`.
    /// When omitted, every `.feature` file in the features directory runs.
    #[arg(value_name = "FEATURE")]
    pub identifiers: Vec<String>,

    /// Report format (text, json).
    #[arg(long)]
    pub format: Option<OutputFormat>,

    /// Stop after the first failing feature.
    #[arg(long)]
    pub fail_fast: bool,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long)]
    pub log_level: Option<LogLevel>,

    /// Directory searched for `.feature` files.
    #[arg(long, value_name = "DIR")]
    pub features_dir: Option<PathBuf>,
}

impl Args {
    /// Layer these arguments over `config`.
    #[must_use]
    pub fn apply_to(&self, config: RunnerConfig) -> RunnerConfig {
        config.apply_overrides(
            self.log_level,
            self.format,
            self.fail_fast.then_some(true),
            self.features_dir.clone(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> Args {
        Args::try_parse_from(argv).unwrap_or_else(|err| panic!("arguments should parse: {err}"))
    }

    #[test]
    fn parses_identifiers_and_flags() {
        let args = parse(&[
            "runner",
            "features/cart.feature:4",
            "features/billing.feature",
            "--format",
            "json",
            "--fail-fast",
            "--log-level",
            "debug",
        ]);
        assert_eq!(
            args.identifiers,
            vec!["features/cart.feature:4", "features/billing.feature"]
        );
        assert_eq!(args.format, Some(OutputFormat::Json));
        assert!(args.fail_fast);
        assert_eq!(args.log_level, Some(LogLevel::Debug));
    }

    #[test]
    fn rejects_unknown_format() {
        assert!(Args::try_parse_from(["runner", "--format", "xml"]).is_err());
    }

    #[test]
    fn unset_flags_leave_config_untouched() {
        let config = RunnerConfig {
            fail_fast: true,
            ..RunnerConfig::default()
        };
        assert_eq!(parse(&["runner"]).apply_to(config.clone()), config);
    }

    #[test]
    fn flags_override_config() {
        let config = parse(&["runner", "--features-dir", "specs", "--fail-fast"])
            .apply_to(RunnerConfig::default());
        assert_eq!(config.features_dir, PathBuf::from("specs"));
        assert!(config.fail_fast);
    }
}
