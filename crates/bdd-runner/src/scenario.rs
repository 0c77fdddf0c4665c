//! Execution of a single scenario.

use std::panic::{AssertUnwindSafe, catch_unwind};

use crate::document::{ScenarioDescriptor, StepDescriptor};
use crate::error::RunnerError;
use crate::failure::ScenarioFailure;
use crate::implementation::{FeatureImplementation, HookPhase, StepOutcome};
use crate::panic::panic_message;
use crate::reporting::{Reporter, StepStatus};

/// Runs one scenario's steps against an implementation.
///
/// Steps run in order, background first. The first step that does not pass
/// stops execution; the remaining steps are reported as skipped.
pub struct ScenarioRunner<'a> {
    feature_name: &'a str,
    implementation: &'a mut dyn FeatureImplementation,
    scenario: &'a ScenarioDescriptor,
    reporter: &'a mut dyn Reporter,
}

impl<'a> ScenarioRunner<'a> {
    /// Prepare a run of `scenario` from the feature called `feature_name`.
    pub fn new(
        feature_name: &'a str,
        implementation: &'a mut dyn FeatureImplementation,
        scenario: &'a ScenarioDescriptor,
        reporter: &'a mut dyn Reporter,
    ) -> Self {
        Self {
            feature_name,
            implementation,
            scenario,
            reporter,
        }
    }

    /// Execute the scenario.
    ///
    /// Returns `Ok(None)` when every step passed or the scenario stopped at
    /// a pending step, and `Ok(Some(failure))` when a step failed, panicked
    /// or had no definition.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError::ScenarioHook`] when a scenario hook fails and
    /// [`RunnerError::StepInvocation`] when a step cannot be invoked.
    pub fn run(mut self) -> Result<Option<ScenarioFailure>, RunnerError> {
        let scenario = self.scenario;
        self.reporter.on_scenario_started(self.feature_name, scenario);
        self.scenario_hook(HookPhase::Before)?;

        let mut failure = None;
        let mut halted = false;
        for step in scenario.all_steps() {
            if halted {
                self.reporter.on_step(scenario, step, &StepStatus::Skipped);
                continue;
            }
            let status = self.execute(step)?;
            self.reporter.on_step(scenario, step, &status);
            if status.is_passed() {
                continue;
            }
            halted = true;
            if let Some(reason) = status.failure_reason() {
                failure = Some(ScenarioFailure::new(self.feature_name, scenario, step, reason));
            }
        }

        self.scenario_hook(HookPhase::After)?;
        self.reporter
            .on_scenario_finished(self.feature_name, scenario, failure.as_ref());
        Ok(failure)
    }

    fn scenario_hook(&mut self, phase: HookPhase) -> Result<(), RunnerError> {
        self.implementation
            .run_scenario_hook(phase, self.scenario)
            .map_err(|source| RunnerError::ScenarioHook {
                phase,
                scenario: self.scenario.name.clone(),
                line: self.scenario.line,
                source,
            })
    }

    fn execute(&mut self, step: &StepDescriptor) -> Result<StepStatus, RunnerError> {
        let implementation = &mut *self.implementation;
        let outcome = catch_unwind(AssertUnwindSafe(|| implementation.execute_step(step)));
        match outcome {
            Ok(Ok(StepOutcome::Passed)) => Ok(StepStatus::Passed),
            Ok(Ok(StepOutcome::Failed(message))) => Ok(StepStatus::Failed(message)),
            Ok(Ok(StepOutcome::Undefined)) => Ok(StepStatus::Undefined),
            Ok(Ok(StepOutcome::Pending(reason))) => Ok(StepStatus::Pending(reason)),
            Ok(Err(source)) => Err(RunnerError::StepInvocation {
                keyword: step.keyword_text.clone(),
                text: step.text.clone(),
                line: step.line,
                source,
            }),
            Err(payload) => {
                let message = panic_message(payload.as_ref());
                log::debug!("step '{}' panicked: {message}", step.text);
                Ok(StepStatus::Panicked(message))
            }
        }
    }
}
