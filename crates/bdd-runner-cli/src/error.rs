//! Error types for the command line host.

use thiserror::Error;

/// Errors raised while assembling the run configuration.
#[derive(Debug, Error)]
pub enum CliError {
    /// An invalid configuration value was provided.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
