//! Per-scenario outcome records collected by summary reporters.

use super::StepStatus;
use crate::document::ScenarioDescriptor;
use crate::failure::ScenarioFailure;

/// Final status of a scenario.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ScenarioStatus {
    /// Every step passed.
    Passed,
    /// The scenario stopped at a pending step.
    Pending(Option<String>),
    /// The scenario failed.
    Failed(ScenarioFailure),
}

impl ScenarioStatus {
    /// Lowercase label for the status.
    ///
    /// # Examples
    /// ```
    /// use bdd_runner::reporting::ScenarioStatus;
    ///
    /// assert_eq!(ScenarioStatus::Pending(None).label(), "pending");
    /// ```
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Passed => "passed",
            Self::Pending(_) => "pending",
            Self::Failed(_) => "failed",
        }
    }
}

/// Outcome recorded for a single scenario execution.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScenarioRecord {
    feature_name: String,
    scenario_name: String,
    line: u32,
    tags: Vec<String>,
    status: ScenarioStatus,
}

impl ScenarioRecord {
    /// Construct a record for a finished scenario.
    ///
    /// # Examples
    /// ```
    /// use bdd_runner::reporting::{ScenarioRecord, ScenarioStatus};
    ///
    /// let record = ScenarioRecord::new("Cart", "empty cart", 4, Vec::new(), ScenarioStatus::Passed);
    /// assert_eq!(record.feature_name(), "Cart");
    /// assert_eq!(record.line(), 4);
    /// ```
    #[must_use]
    pub fn new(
        feature_name: impl Into<String>,
        scenario_name: impl Into<String>,
        line: u32,
        tags: impl Into<Vec<String>>,
        status: ScenarioStatus,
    ) -> Self {
        Self {
            feature_name: feature_name.into(),
            scenario_name: scenario_name.into(),
            line,
            tags: tags.into(),
            status,
        }
    }

    /// Name of the feature the scenario belongs to.
    #[must_use]
    pub fn feature_name(&self) -> &str {
        &self.feature_name
    }

    /// Name of the scenario.
    #[must_use]
    pub fn scenario_name(&self) -> &str {
        &self.scenario_name
    }

    /// Source line of the scenario.
    #[must_use]
    pub fn line(&self) -> u32 {
        self.line
    }

    /// Tags applied to the scenario.
    #[must_use]
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Final status.
    #[must_use]
    pub fn status(&self) -> &ScenarioStatus {
        &self.status
    }
}

/// Builds [`ScenarioRecord`]s from the event stream.
#[derive(Debug, Default)]
pub(crate) struct RecordCollector {
    pending: Option<Option<String>>,
    records: Vec<ScenarioRecord>,
}

impl RecordCollector {
    pub(crate) fn observe_step(&mut self, status: &StepStatus) {
        if let StepStatus::Pending(reason) = status {
            self.pending = Some(reason.clone());
        }
    }

    pub(crate) fn finish(
        &mut self,
        feature_name: &str,
        scenario: &ScenarioDescriptor,
        failure: Option<&ScenarioFailure>,
    ) {
        let pending = self.pending.take();
        let status = match (failure, pending) {
            (Some(failure), _) => ScenarioStatus::Failed(failure.clone()),
            (None, Some(reason)) => ScenarioStatus::Pending(reason),
            (None, None) => ScenarioStatus::Passed,
        };
        self.records.push(ScenarioRecord::new(
            feature_name,
            scenario.name.clone(),
            scenario.line,
            scenario.tags.clone(),
            status,
        ));
    }

    pub(crate) fn records(&self) -> &[ScenarioRecord] {
        &self.records
    }
}
