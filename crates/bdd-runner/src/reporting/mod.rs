//! Run event reporting.
//!
//! Runners push events into a [`Reporter`] as they go. Every method has a
//! no-op default, so a reporter implements only the events it cares about.
//! The module ships a human-readable [`TextReporter`], a JSON summary writer
//! behind the `json` feature, and a [`RecordingReporter`] that keeps every
//! event in memory.

#[cfg(feature = "json")]
pub mod json;
mod record;
mod recording;
mod text;

pub use record::{ScenarioRecord, ScenarioStatus};
pub use recording::{RecordingReporter, ReportEvent};
pub use text::TextReporter;

use crate::document::{ScenarioDescriptor, StepDescriptor};
use crate::failure::{FailureReason, ScenarioFailure};

/// Status of a single step as seen by reporters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepStatus {
    /// The step ran to completion.
    Passed,
    /// The step reported a failure.
    Failed(String),
    /// The step panicked.
    Panicked(String),
    /// No definition matched the step.
    Undefined,
    /// The step is not implemented yet.
    Pending(Option<String>),
    /// An earlier step did not pass, so this one never ran.
    Skipped,
}

impl StepStatus {
    /// Lowercase label for the status.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Passed => "passed",
            Self::Failed(_) => "failed",
            Self::Panicked(_) => "panicked",
            Self::Undefined => "undefined",
            Self::Pending(_) => "pending",
            Self::Skipped => "skipped",
        }
    }

    /// Whether the step passed.
    #[must_use]
    pub const fn is_passed(&self) -> bool {
        matches!(self, Self::Passed)
    }

    /// The failure this status causes, if it fails the scenario.
    #[must_use]
    pub fn failure_reason(&self) -> Option<FailureReason> {
        match self {
            Self::Failed(message) => Some(FailureReason::Failed(message.clone())),
            Self::Panicked(message) => Some(FailureReason::Panicked(message.clone())),
            Self::Undefined => Some(FailureReason::Undefined),
            Self::Passed | Self::Pending(_) | Self::Skipped => None,
        }
    }
}

/// Receives progress events from the runners.
pub trait Reporter {
    /// A feature run is starting.
    fn on_feature_started(&mut self, _feature_name: &str) {}

    /// A selected scenario is about to run.
    fn on_scenario_started(&mut self, _feature_name: &str, _scenario: &ScenarioDescriptor) {}

    /// A step finished with `status`.
    fn on_step(
        &mut self,
        _scenario: &ScenarioDescriptor,
        _step: &StepDescriptor,
        _status: &StepStatus,
    ) {
    }

    /// A scenario finished, with its failure if it failed.
    fn on_scenario_finished(
        &mut self,
        _feature_name: &str,
        _scenario: &ScenarioDescriptor,
        _failure: Option<&ScenarioFailure>,
    ) {
    }

    /// The line selector of the run matched no scenario.
    fn on_unmatched_line(&mut self, _feature_name: &str, _line: &str) {}

    /// A feature finished with at least one failed scenario.
    fn on_error_summary(&mut self, _failures: &[ScenarioFailure]) {}

    /// A suite finished; `success` is the overall verdict.
    fn on_run_finished(&mut self, _success: bool) {}
}

/// A reporter that ignores every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullReporter;

impl Reporter for NullReporter {}
