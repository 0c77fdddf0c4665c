//! Plain-text progress reporter.

use std::fmt;
use std::io::Write;

use super::record::RecordCollector;
use super::{Reporter, ScenarioStatus, StepStatus};
use crate::document::{ScenarioDescriptor, StepDescriptor};
use crate::failure::ScenarioFailure;

/// Writes a line per feature, scenario and step, followed by failure
/// summaries and a closing tally.
///
/// Write errors are logged and otherwise ignored so that a closed pipe never
/// changes the outcome of a run.
///
/// # Examples
///
/// ```
/// use bdd_runner::{Reporter, TextReporter};
///
/// let mut reporter = TextReporter::new(Vec::new());
/// reporter.on_feature_started("Cart");
/// let output = String::from_utf8(reporter.into_inner()).unwrap();
/// assert_eq!(output, "Feature: Cart\n");
/// ```
#[derive(Debug)]
pub struct TextReporter<W: Write> {
    writer: W,
    collector: RecordCollector,
}

impl<W: Write> TextReporter<W> {
    /// Report into `writer`.
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            collector: RecordCollector::default(),
        }
    }

    /// Recover the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn emit(&mut self, line: fmt::Arguments<'_>) {
        if let Err(err) = writeln!(self.writer, "{line}") {
            log::warn!("failed to write report output: {err}");
        }
    }

    fn tally(&self) -> (usize, usize, usize) {
        self.collector
            .records()
            .iter()
            .fold((0, 0, 0), |(passed, failed, pending), record| {
                match record.status() {
                    ScenarioStatus::Passed => (passed + 1, failed, pending),
                    ScenarioStatus::Failed(_) => (passed, failed + 1, pending),
                    ScenarioStatus::Pending(_) => (passed, failed, pending + 1),
                }
            })
    }
}

impl<W: Write> Reporter for TextReporter<W> {
    fn on_feature_started(&mut self, feature_name: &str) {
        self.emit(format_args!("Feature: {feature_name}"));
    }

    fn on_scenario_started(&mut self, _feature_name: &str, scenario: &ScenarioDescriptor) {
        self.emit(format_args!(
            "  {}: {} (line {})",
            scenario.keyword, scenario.name, scenario.line
        ));
    }

    fn on_step(&mut self, _scenario: &ScenarioDescriptor, step: &StepDescriptor, status: &StepStatus) {
        self.collector.observe_step(status);
        let detail = match status {
            StepStatus::Failed(message) | StepStatus::Panicked(message) => format!(": {message}"),
            StepStatus::Pending(Some(reason)) => format!(": {reason}"),
            _ => String::new(),
        };
        self.emit(format_args!(
            "    [{}] {} {}{detail}",
            status.label(),
            step.keyword_text,
            step.text
        ));
    }

    fn on_scenario_finished(
        &mut self,
        feature_name: &str,
        scenario: &ScenarioDescriptor,
        failure: Option<&ScenarioFailure>,
    ) {
        self.collector.finish(feature_name, scenario, failure);
    }

    fn on_unmatched_line(&mut self, feature_name: &str, line: &str) {
        self.emit(format_args!(
            "  warning: no scenario of '{feature_name}' starts on line {line}"
        ));
    }

    fn on_error_summary(&mut self, failures: &[ScenarioFailure]) {
        self.emit(format_args!("Failures:"));
        for (index, failure) in failures.iter().enumerate() {
            self.emit(format_args!("  {}) {failure}", index + 1));
        }
    }

    fn on_run_finished(&mut self, success: bool) {
        let (passed, failed, pending) = self.tally();
        let total = passed + failed + pending;
        let verdict = if success { "ok" } else { "FAILED" };
        self.emit(format_args!(
            "{total} scenarios ({passed} passed, {failed} failed, {pending} pending): {verdict}"
        ));
        if let Err(err) = self.writer.flush() {
            log::warn!("failed to flush report output: {err}");
        }
    }
}
