//! The contract between the runners and the code that implements a feature.

use std::fmt;

use crate::document::{ScenarioDescriptor, StepDescriptor};
use crate::error::{HookError, InvocationError};

/// When a hook runs relative to the work it wraps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HookPhase {
    /// Runs before the feature or scenario.
    Before,
    /// Runs after the feature or scenario.
    After,
}

impl HookPhase {
    /// Lowercase label used in messages.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Before => "before",
            Self::After => "after",
        }
    }
}

impl fmt::Display for HookPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of executing a single step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    /// The step ran to completion.
    Passed,
    /// The step ran and reported a failure.
    Failed(String),
    /// No step definition matches the step text.
    Undefined,
    /// The step exists but is not implemented yet.
    Pending(Option<String>),
}

/// Executable code bound to one feature.
///
/// One instance is created per feature run and receives every hook and step
/// of that run, so state stored on `self` is shared by its scenarios.
pub trait FeatureImplementation {
    /// Run the feature-scoped hook for `phase`.
    ///
    /// # Errors
    ///
    /// Returns [`HookError`] to abort the feature run.
    fn run_hook(&mut self, phase: HookPhase, feature_name: &str) -> Result<(), HookError> {
        let _ = (phase, feature_name);
        Ok(())
    }

    /// Run the scenario-scoped hook for `phase`.
    ///
    /// # Errors
    ///
    /// Returns [`HookError`] to abort the feature run.
    fn run_scenario_hook(
        &mut self,
        phase: HookPhase,
        scenario: &ScenarioDescriptor,
    ) -> Result<(), HookError> {
        let _ = (phase, scenario);
        Ok(())
    }

    /// Execute `step` and report how it went.
    ///
    /// Ordinary failures are reported through [`StepOutcome`]; only problems
    /// that prevent the step from running at all are errors.
    ///
    /// # Errors
    ///
    /// Returns [`InvocationError`] when the step cannot be invoked.
    fn execute_step(&mut self, step: &StepDescriptor) -> Result<StepOutcome, InvocationError>;
}
