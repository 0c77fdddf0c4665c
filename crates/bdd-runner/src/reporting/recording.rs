//! In-memory reporter that keeps every event.

use super::{Reporter, StepStatus};
use crate::document::{ScenarioDescriptor, StepDescriptor};
use crate::failure::ScenarioFailure;

/// One event received by a [`RecordingReporter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportEvent {
    /// See [`Reporter::on_feature_started`].
    FeatureStarted {
        /// Feature name.
        feature: String,
    },
    /// See [`Reporter::on_scenario_started`].
    ScenarioStarted {
        /// Feature name.
        feature: String,
        /// Scenario name.
        scenario: String,
        /// Scenario line.
        line: u32,
    },
    /// See [`Reporter::on_step`].
    Step {
        /// Line of the scenario owning the step.
        scenario_line: u32,
        /// Step text.
        text: String,
        /// Step status.
        status: StepStatus,
    },
    /// See [`Reporter::on_scenario_finished`].
    ScenarioFinished {
        /// Feature name.
        feature: String,
        /// Scenario line.
        line: u32,
        /// Failure, if the scenario failed.
        failure: Option<ScenarioFailure>,
    },
    /// See [`Reporter::on_unmatched_line`].
    UnmatchedLine {
        /// Feature name.
        feature: String,
        /// Line selector that matched nothing.
        line: String,
    },
    /// See [`Reporter::on_error_summary`].
    ErrorSummary(Vec<ScenarioFailure>),
    /// See [`Reporter::on_run_finished`].
    RunFinished(bool),
}

/// Reporter that stores events for later inspection.
///
/// # Examples
///
/// ```
/// use bdd_runner::{RecordingReporter, ReportEvent, Reporter};
///
/// let mut reporter = RecordingReporter::default();
/// reporter.on_feature_started("Cart");
/// assert_eq!(
///     reporter.events(),
///     [ReportEvent::FeatureStarted { feature: "Cart".into() }]
/// );
/// ```
#[derive(Debug, Default, Clone)]
pub struct RecordingReporter {
    events: Vec<ReportEvent>,
}

impl RecordingReporter {
    /// Create an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Events in the order they arrived.
    #[must_use]
    pub fn events(&self) -> &[ReportEvent] {
        &self.events
    }

    /// Lines of the scenarios that started, in order.
    #[must_use]
    pub fn started_scenarios(&self) -> Vec<u32> {
        self.events
            .iter()
            .filter_map(|event| match event {
                ReportEvent::ScenarioStarted { line, .. } => Some(*line),
                _ => None,
            })
            .collect()
    }

    /// Every error summary received.
    #[must_use]
    pub fn error_summaries(&self) -> Vec<&[ScenarioFailure]> {
        self.events
            .iter()
            .filter_map(|event| match event {
                ReportEvent::ErrorSummary(failures) => Some(failures.as_slice()),
                _ => None,
            })
            .collect()
    }

    /// `(text, status)` of every reported step, in order.
    #[must_use]
    pub fn step_statuses(&self) -> Vec<(&str, &StepStatus)> {
        self.events
            .iter()
            .filter_map(|event| match event {
                ReportEvent::Step { text, status, .. } => Some((text.as_str(), status)),
                _ => None,
            })
            .collect()
    }
}

impl Reporter for RecordingReporter {
    fn on_feature_started(&mut self, feature_name: &str) {
        self.events.push(ReportEvent::FeatureStarted {
            feature: feature_name.to_owned(),
        });
    }

    fn on_scenario_started(&mut self, feature_name: &str, scenario: &ScenarioDescriptor) {
        self.events.push(ReportEvent::ScenarioStarted {
            feature: feature_name.to_owned(),
            scenario: scenario.name.clone(),
            line: scenario.line,
        });
    }

    fn on_step(&mut self, scenario: &ScenarioDescriptor, step: &StepDescriptor, status: &StepStatus) {
        self.events.push(ReportEvent::Step {
            scenario_line: scenario.line,
            text: step.text.clone(),
            status: status.clone(),
        });
    }

    fn on_scenario_finished(
        &mut self,
        feature_name: &str,
        scenario: &ScenarioDescriptor,
        failure: Option<&ScenarioFailure>,
    ) {
        self.events.push(ReportEvent::ScenarioFinished {
            feature: feature_name.to_owned(),
            line: scenario.line,
            failure: failure.cloned(),
        });
    }

    fn on_unmatched_line(&mut self, feature_name: &str, line: &str) {
        self.events.push(ReportEvent::UnmatchedLine {
            feature: feature_name.to_owned(),
            line: line.to_owned(),
        });
    }

    fn on_error_summary(&mut self, failures: &[ScenarioFailure]) {
        self.events.push(ReportEvent::ErrorSummary(failures.to_vec()));
    }

    fn on_run_finished(&mut self, success: bool) {
        self.events.push(ReportEvent::RunFinished(success));
    }
}
