//! Descriptions of failed scenarios.

use std::fmt;

use crate::document::{ScenarioDescriptor, StepDescriptor};

/// Why a step failed its scenario.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureReason {
    /// The step reported a failure.
    Failed(String),
    /// The step panicked; carries the panic message.
    Panicked(String),
    /// No step definition matched.
    Undefined,
}

impl FailureReason {
    /// Lowercase label used by reporters.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Failed(_) => "failed",
            Self::Panicked(_) => "panicked",
            Self::Undefined => "undefined",
        }
    }

    /// Message attached to the failure, if any.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Failed(message) | Self::Panicked(message) => Some(message),
            Self::Undefined => None,
        }
    }
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Failed(message) => write!(f, "failed: {message}"),
            Self::Panicked(message) => write!(f, "panicked: {message}"),
            Self::Undefined => f.write_str("undefined step"),
        }
    }
}

/// The step at which a scenario stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedStep {
    /// Keyword as written in the feature file.
    pub keyword: String,
    /// Step text.
    pub text: String,
    /// Source line of the step.
    pub line: u32,
}

impl From<&StepDescriptor> for FailedStep {
    fn from(step: &StepDescriptor) -> Self {
        Self {
            keyword: step.keyword_text.clone(),
            text: step.text.clone(),
            line: step.line,
        }
    }
}

/// A failed scenario, produced by the scenario runner and forwarded
/// unchanged to the reporter's error summary.
///
/// # Examples
///
/// ```
/// use bdd_runner::{FailureReason, ScenarioDescriptor, ScenarioFailure, StepDescriptor, StepKeyword};
///
/// let scenario = ScenarioDescriptor::new("adding", 3);
/// let step = StepDescriptor::new(StepKeyword::Then, "the total is 5", 6);
/// let failure = ScenarioFailure::new("Calculator", &scenario, &step, FailureReason::Undefined);
/// assert_eq!(
///     failure.to_string(),
///     "Calculator: adding (line 3): Then the total is 5 (line 6): undefined step"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScenarioFailure {
    feature: String,
    scenario: String,
    line: u32,
    step: FailedStep,
    reason: FailureReason,
}

impl ScenarioFailure {
    /// Describe `scenario` of `feature` failing at `step`.
    pub fn new(
        feature: impl Into<String>,
        scenario: &ScenarioDescriptor,
        step: &StepDescriptor,
        reason: FailureReason,
    ) -> Self {
        Self {
            feature: feature.into(),
            scenario: scenario.name.clone(),
            line: scenario.line,
            step: FailedStep::from(step),
            reason,
        }
    }

    /// Name of the feature.
    #[must_use]
    pub fn feature(&self) -> &str {
        &self.feature
    }

    /// Name of the scenario.
    #[must_use]
    pub fn scenario(&self) -> &str {
        &self.scenario
    }

    /// Line of the scenario.
    #[must_use]
    pub fn line(&self) -> u32 {
        self.line
    }

    /// The step that failed.
    #[must_use]
    pub fn step(&self) -> &FailedStep {
        &self.step
    }

    /// Why the step failed.
    #[must_use]
    pub fn reason(&self) -> &FailureReason {
        &self.reason
    }
}

impl fmt::Display for ScenarioFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} (line {}): {} {} (line {}): {}",
            self.feature,
            self.scenario,
            self.line,
            self.step.keyword,
            self.step.text,
            self.step.line,
            self.reason
        )
    }
}
