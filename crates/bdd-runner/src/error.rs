//! Error types raised while loading, resolving and running features.
//!
//! Fatal setup problems surface as [`RunnerError`] and abort the current run.
//! Ordinary step failures never appear here; the scenario runner turns them
//! into [`ScenarioFailure`](crate::ScenarioFailure) values instead.

use std::path::PathBuf;

use thiserror::Error;

use crate::implementation::HookPhase;
use crate::steps::PatternError;

/// Errors that abort a feature run.
#[derive(Debug, Error)]
pub enum RunnerError {
    /// The feature identifier could not be split into a path and line.
    #[error("malformed feature identifier '{identifier}': {reason}")]
    MalformedIdentifier {
        /// Identifier text as supplied by the caller.
        identifier: String,
        /// Short explanation of what is wrong with it.
        reason: &'static str,
    },

    /// The feature document could not be read or parsed.
    #[error(transparent)]
    Document(#[from] DocumentError),

    /// No implementation could be resolved for the feature.
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    /// A feature-level hook reported an error.
    #[error("{phase} hook failed for feature '{feature}': {source}")]
    FeatureHook {
        /// Phase of the failing hook.
        phase: HookPhase,
        /// Name of the feature the hook was scoped to.
        feature: String,
        /// Error reported by the hook.
        source: HookError,
    },

    /// A scenario-level hook reported an error.
    #[error("{phase} scenario hook failed for '{scenario}' (line {line}): {source}")]
    ScenarioHook {
        /// Phase of the failing hook.
        phase: HookPhase,
        /// Name of the scenario the hook was scoped to.
        scenario: String,
        /// Line of the scenario in its feature file.
        line: u32,
        /// Error reported by the hook.
        source: HookError,
    },

    /// A step could not be invoked at all.
    #[error("cannot invoke step '{keyword} {text}' (line {line}): {source}")]
    StepInvocation {
        /// Keyword of the step as written in the feature file.
        keyword: String,
        /// Step text.
        text: String,
        /// Line of the step in its feature file.
        line: u32,
        /// Underlying infrastructure error.
        source: InvocationError,
    },
}

/// Errors raised by a [`DocumentProvider`](crate::DocumentProvider).
#[derive(Debug, Error)]
pub enum DocumentError {
    /// The feature file could not be read.
    #[error("failed to read feature file '{}': {source}", .path.display())]
    Read {
        /// Path that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The feature file is not valid Gherkin.
    #[error("failed to parse feature file '{}': {message}", .path.display())]
    Parse {
        /// Path of the offending document.
        path: PathBuf,
        /// Parser diagnostic.
        message: String,
    },
}

/// Errors raised by an [`ImplementationResolver`](crate::ImplementationResolver).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResolveError {
    /// Nothing is registered under the feature name.
    #[error("no implementation registered for feature '{name}'{}", known_suffix(.known))]
    ImplementationNotFound {
        /// Feature name that failed to resolve.
        name: String,
        /// Names the resolver does know about, sorted.
        known: Vec<String>,
    },

    /// More than one implementation claims the feature name.
    #[error("feature '{name}' has several implementations: {}", .locations.join(", "))]
    DuplicateImplementation {
        /// Feature name registered more than once.
        name: String,
        /// `file:line` of every registration.
        locations: Vec<String>,
    },
}

fn known_suffix(known: &[String]) -> String {
    if known.is_empty() {
        String::new()
    } else {
        format!(" (known features: {})", known.join(", "))
    }
}

/// Errors raised while building a [`Registry`](crate::Registry).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    /// A factory is already registered under this name.
    #[error("feature '{0}' is already registered")]
    Duplicate(String),
}

/// Error reported by a feature or scenario hook.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct HookError {
    message: String,
}

impl HookError {
    /// Create a hook error carrying `message`.
    ///
    /// # Examples
    ///
    /// ```
    /// use bdd_runner::HookError;
    ///
    /// let error = HookError::new("database unavailable");
    /// assert_eq!(error.message(), "database unavailable");
    /// ```
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Message describing the failure.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Infrastructure errors preventing a step from being invoked.
#[derive(Debug, Error)]
pub enum InvocationError {
    /// A step pattern could not be compiled.
    #[error("invalid step pattern '{pattern}': {source}")]
    InvalidPattern {
        /// Pattern text as registered.
        pattern: String,
        /// Compilation error.
        source: PatternError,
    },

    /// The implementation cannot execute steps.
    #[error("step executor unavailable: {0}")]
    Unavailable(String),
}

/// Error returned by a step handler.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StepError {
    /// An assertion or operation inside the step failed.
    #[error("{0}")]
    Failed(String),

    /// The step has not been implemented yet.
    #[error("step pending{}", pending_suffix(.0.as_deref()))]
    Pending(Option<String>),
}

fn pending_suffix(reason: Option<&str>) -> String {
    reason.map(|text| format!(": {text}")).unwrap_or_default()
}

impl StepError {
    /// Shorthand for [`StepError::Failed`].
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed(message.into())
    }

    /// Shorthand for a [`StepError::Pending`] without a reason.
    #[must_use]
    pub fn pending() -> Self {
        Self::Pending(None)
    }

    /// Shorthand for a [`StepError::Pending`] carrying `reason`.
    pub fn pending_with(reason: impl Into<String>) -> Self {
        Self::Pending(Some(reason.into()))
    }
}

impl From<String> for StepError {
    fn from(message: String) -> Self {
        Self::Failed(message)
    }
}

impl From<&str> for StepError {
    fn from(message: &str) -> Self {
        Self::Failed(message.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn malformed_identifier_names_the_input() {
        let error = RunnerError::MalformedIdentifier {
            identifier: "a.feature:".into(),
            reason: "missing line number after ':'",
        };
        assert_eq!(
            error.to_string(),
            "malformed feature identifier 'a.feature:': missing line number after ':'"
        );
    }

    #[test]
    fn parse_error_mentions_path() {
        let error = DocumentError::Parse {
            path: PathBuf::from("features/a.feature"),
            message: "unexpected token".into(),
        };
        assert_eq!(
            error.to_string(),
            "failed to parse feature file 'features/a.feature': unexpected token"
        );
    }

    #[rstest]
    #[case(Vec::new(), "no implementation registered for feature 'Billing'")]
    #[case(
        vec!["Auth".to_owned(), "Cart".to_owned()],
        "no implementation registered for feature 'Billing' (known features: Auth, Cart)"
    )]
    fn not_found_lists_known_features(#[case] known: Vec<String>, #[case] expected: &str) {
        let error = ResolveError::ImplementationNotFound {
            name: "Billing".into(),
            known,
        };
        assert_eq!(error.to_string(), expected);
    }

    #[test]
    fn feature_hook_error_wraps_source() {
        let error = RunnerError::FeatureHook {
            phase: HookPhase::Before,
            feature: "Checkout".into(),
            source: HookError::new("no database"),
        };
        assert_eq!(
            error.to_string(),
            "before hook failed for feature 'Checkout': no database"
        );
    }

    #[rstest]
    #[case(StepError::pending(), "step pending")]
    #[case(StepError::pending_with("awaiting API"), "step pending: awaiting API")]
    #[case(StepError::from("expected 3, got 4"), "expected 3, got 4")]
    fn step_error_display(#[case] error: StepError, #[case] expected: &str) {
        assert_eq!(error.to_string(), expected);
    }

    #[test]
    fn document_error_converts_into_runner_error() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let error: RunnerError = DocumentError::Read {
            path: PathBuf::from("x.feature"),
            source: io,
        }
        .into();
        assert!(matches!(error, RunnerError::Document(DocumentError::Read { .. })));
        assert!(error.to_string().contains("missing"));
    }
}
