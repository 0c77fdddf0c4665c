//! JSON summary reporter.
//!
//! Scenario outcomes are collected during the run and written as a single
//! JSON document when the run finishes. Status labels are lowercase so
//! downstream tools can rely on consistent casing.

use std::io::Write;

use serde::Serialize;

use super::record::RecordCollector;
use super::{Reporter, ScenarioRecord, ScenarioStatus, StepStatus};
use crate::document::{ScenarioDescriptor, StepDescriptor};
use crate::failure::ScenarioFailure;

#[derive(Serialize)]
struct JsonReport<'a> {
    success: bool,
    scenarios: Vec<JsonScenario<'a>>,
}

#[derive(Serialize)]
struct JsonScenario<'a> {
    feature: &'a str,
    scenario: &'a str,
    line: u32,
    tags: &'a [String],
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pending: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    failure: Option<JsonFailure<'a>>,
}

#[derive(Serialize)]
struct JsonFailure<'a> {
    step: String,
    step_line: u32,
    reason: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<&'a str>,
}

impl<'a> From<&'a ScenarioRecord> for JsonScenario<'a> {
    fn from(record: &'a ScenarioRecord) -> Self {
        let (pending, failure) = match record.status() {
            ScenarioStatus::Passed => (None, None),
            ScenarioStatus::Pending(reason) => (reason.as_deref(), None),
            ScenarioStatus::Failed(failure) => (None, Some(JsonFailure::from(failure))),
        };
        Self {
            feature: record.feature_name(),
            scenario: record.scenario_name(),
            line: record.line(),
            tags: record.tags(),
            status: record.status().label(),
            pending,
            failure,
        }
    }
}

impl<'a> From<&'a ScenarioFailure> for JsonFailure<'a> {
    fn from(failure: &'a ScenarioFailure) -> Self {
        let step = failure.step();
        Self {
            step: format!("{} {}", step.keyword, step.text),
            step_line: step.line,
            reason: failure.reason().label(),
            message: failure.reason().message(),
        }
    }
}

/// Produce the JSON document for `records`.
///
/// # Examples
/// ```rust
/// use bdd_runner::reporting::{json, ScenarioRecord, ScenarioStatus};
///
/// let records = vec![ScenarioRecord::new("Cart", "empty", 3, Vec::new(), ScenarioStatus::Passed)];
/// let text = json::to_string(&records, true).unwrap();
/// assert!(text.contains("\"status\":\"passed\""));
/// assert!(text.starts_with("{\"success\":true"));
/// ```
///
/// # Errors
/// Returns an error when serialisation fails.
pub fn to_string(records: &[ScenarioRecord], success: bool) -> serde_json::Result<String> {
    serde_json::to_string(&report(records, success))
}

/// Serialise `records` into `writer`.
///
/// # Errors
/// Returns an error when serialisation or writing fails.
pub fn write<W: Write>(
    writer: &mut W,
    records: &[ScenarioRecord],
    success: bool,
) -> serde_json::Result<()> {
    serde_json::to_writer(writer, &report(records, success))
}

fn report(records: &[ScenarioRecord], success: bool) -> JsonReport<'_> {
    JsonReport {
        success,
        scenarios: records.iter().map(JsonScenario::from).collect(),
    }
}

/// Collects scenario outcomes and writes them as JSON when the run
/// finishes.
#[derive(Debug)]
pub struct JsonReporter<W: Write> {
    writer: W,
    collector: RecordCollector,
}

impl<W: Write> JsonReporter<W> {
    /// Report into `writer`.
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            collector: RecordCollector::default(),
        }
    }

    /// Records collected so far.
    #[must_use]
    pub fn records(&self) -> &[ScenarioRecord] {
        self.collector.records()
    }

    /// Recover the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> Reporter for JsonReporter<W> {
    fn on_step(&mut self, _scenario: &ScenarioDescriptor, _step: &StepDescriptor, status: &StepStatus) {
        self.collector.observe_step(status);
    }

    fn on_scenario_finished(
        &mut self,
        feature_name: &str,
        scenario: &ScenarioDescriptor,
        failure: Option<&ScenarioFailure>,
    ) {
        self.collector.finish(feature_name, scenario, failure);
    }

    fn on_run_finished(&mut self, success: bool) {
        let result = write(&mut self.writer, self.collector.records(), success)
            .map_err(std::io::Error::from)
            .and_then(|()| writeln!(self.writer))
            .and_then(|()| self.writer.flush());
        if let Err(err) = result {
            log::warn!("failed to write JSON report: {err}");
        }
    }
}
