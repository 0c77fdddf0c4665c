//! Scripted collaborators for exercising the runners in tests.
//!
//! The doubles record every hook and step call in a shared [`CallLog`] so
//! tests can assert on ordering and call counts without touching the file
//! system or the global registry.
//!
//! Scripted steps behave according to the first word of their text:
//! `passing`, `failing`, `panicking`, `pending` and `broken` (an invocation
//! error). Any other text is undefined.

use std::cell::{Cell, RefCell};
use std::path::Path;
use std::rc::Rc;

use crate::document::{DocumentProvider, FeatureDocument, ScenarioDescriptor, StepDescriptor};
use crate::error::{DocumentError, HookError, InvocationError, ResolveError};
use crate::implementation::{FeatureImplementation, HookPhase, StepOutcome};
use crate::keyword::StepKeyword;
use crate::registry::ImplementationResolver;

/// Shared, ordered log of calls made to scripted doubles.
#[derive(Debug, Clone, Default)]
pub struct CallLog(Rc<RefCell<Vec<String>>>);

impl CallLog {
    fn push(&self, entry: String) {
        self.0.borrow_mut().push(entry);
    }

    /// Snapshot of every entry.
    #[must_use]
    pub fn entries(&self) -> Vec<String> {
        self.0.borrow().clone()
    }

    /// Number of entries equal to `entry`.
    #[must_use]
    pub fn count(&self, entry: &str) -> usize {
        self.0.borrow().iter().filter(|e| *e == entry).count()
    }
}

/// Build a scenario whose steps are all `Given` steps with `texts`.
#[must_use]
pub fn scenario(name: &str, line: u32, texts: &[&str]) -> ScenarioDescriptor {
    texts
        .iter()
        .zip(line + 1..)
        .fold(ScenarioDescriptor::new(name, line), |scenario, (text, step_line)| {
            scenario.with_step(StepDescriptor::new(StepKeyword::Given, *text, step_line))
        })
}

/// Provider returning a fixed document and counting calls.
#[derive(Debug)]
pub struct StaticDocuments {
    document: Result<FeatureDocument, String>,
    calls: Cell<usize>,
}

impl StaticDocuments {
    /// Always return `document`.
    #[must_use]
    pub fn new(document: FeatureDocument) -> Self {
        Self {
            document: Ok(document),
            calls: Cell::new(0),
        }
    }

    /// Always fail with a parse error carrying `message`.
    #[must_use]
    pub fn failing(message: &str) -> Self {
        Self {
            document: Err(message.to_owned()),
            calls: Cell::new(0),
        }
    }

    /// Number of times [`DocumentProvider::parse`] was called.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.get()
    }
}

impl DocumentProvider for StaticDocuments {
    fn parse(&self, path: &Path) -> Result<FeatureDocument, DocumentError> {
        self.calls.set(self.calls.get() + 1);
        self.document.clone().map_err(|message| DocumentError::Parse {
            path: path.to_path_buf(),
            message,
        })
    }
}

/// Implementation whose behaviour is driven by step text.
#[derive(Debug, Clone, Default)]
pub struct ScriptedImplementation {
    log: CallLog,
    failing_hook: Option<HookPhase>,
    failing_scenario_hook: Option<HookPhase>,
}

impl ScriptedImplementation {
    fn hook_result(failing: Option<HookPhase>, phase: HookPhase) -> Result<(), HookError> {
        if failing == Some(phase) {
            Err(HookError::new(format!("scripted {phase} hook failure")))
        } else {
            Ok(())
        }
    }
}

impl FeatureImplementation for ScriptedImplementation {
    fn run_hook(&mut self, phase: HookPhase, feature_name: &str) -> Result<(), HookError> {
        self.log.push(format!("{phase}:{feature_name}"));
        Self::hook_result(self.failing_hook, phase)
    }

    fn run_scenario_hook(
        &mut self,
        phase: HookPhase,
        scenario: &ScenarioDescriptor,
    ) -> Result<(), HookError> {
        self.log.push(format!("{phase}-scenario:{}", scenario.line));
        Self::hook_result(self.failing_scenario_hook, phase)
    }

    fn execute_step(&mut self, step: &StepDescriptor) -> Result<StepOutcome, InvocationError> {
        self.log.push(format!("step:{}", step.text));
        let word = step.text.split_whitespace().next().unwrap_or_default();
        match word {
            "passing" => Ok(StepOutcome::Passed),
            "failing" => Ok(StepOutcome::Failed(format!("'{}' failed", step.text))),
            "pending" => Ok(StepOutcome::Pending(Some("not written yet".into()))),
            "broken" => Err(InvocationError::Unavailable(step.text.clone())),
            "panicking" => panic!("'{}' panicked", step.text),
            _ => Ok(StepOutcome::Undefined),
        }
    }
}

/// Resolver producing [`ScriptedImplementation`]s for a single feature name.
#[derive(Debug)]
pub struct ScriptedResolver {
    feature: String,
    template: ScriptedImplementation,
    resolutions: Cell<usize>,
}

impl ScriptedResolver {
    /// Resolve `feature` to scripted implementations logging into `log`.
    #[must_use]
    pub fn new(feature: &str, log: &CallLog) -> Self {
        Self {
            feature: feature.to_owned(),
            template: ScriptedImplementation {
                log: log.clone(),
                ..ScriptedImplementation::default()
            },
            resolutions: Cell::new(0),
        }
    }

    /// Make the feature hook for `phase` fail.
    #[must_use]
    pub fn failing_hook(mut self, phase: HookPhase) -> Self {
        self.template.failing_hook = Some(phase);
        self
    }

    /// Make the scenario hook for `phase` fail.
    #[must_use]
    pub fn failing_scenario_hook(mut self, phase: HookPhase) -> Self {
        self.template.failing_scenario_hook = Some(phase);
        self
    }

    /// Number of successful resolutions.
    #[must_use]
    pub fn resolutions(&self) -> usize {
        self.resolutions.get()
    }
}

impl ImplementationResolver for ScriptedResolver {
    fn resolve(&self, feature_name: &str) -> Result<Box<dyn FeatureImplementation>, ResolveError> {
        if feature_name != self.feature {
            return Err(ResolveError::ImplementationNotFound {
                name: feature_name.to_owned(),
                known: vec![self.feature.clone()],
            });
        }
        self.resolutions.set(self.resolutions.get() + 1);
        Ok(Box::new(self.template.clone()))
    }
}
