//! Pattern-matched step definitions over a user world.
//!
//! [`StepDefinitions`] is the ready-made [`FeatureImplementation`]: it owns a
//! world value, a list of step definitions keyed by keyword and pattern, and
//! optional hooks. Every handler receives the world mutably, so state flows
//! from one step to the next and across the scenarios of a feature.

mod args;
mod pattern;

pub use args::StepArgs;
pub use pattern::{PatternError, StepPattern};

use crate::document::{ScenarioDescriptor, StepDescriptor};
use crate::error::{HookError, InvocationError, StepError};
use crate::implementation::{FeatureImplementation, HookPhase, StepOutcome};
use crate::keyword::StepKeyword;

/// Handler invoked for a matching step.
pub type StepHandler<W> = fn(&mut W, &StepArgs<'_>) -> Result<(), StepError>;

/// Hook scoped to a feature, receiving the feature name.
pub type FeatureHook<W> = fn(&mut W, &str) -> Result<(), HookError>;

/// Hook scoped to a scenario.
pub type ScenarioHook<W> = fn(&mut W, &ScenarioDescriptor) -> Result<(), HookError>;

struct StepDefinition<W> {
    keyword: StepKeyword,
    source: String,
    pattern: Result<StepPattern, PatternError>,
    handler: StepHandler<W>,
}

/// Step definitions and hooks bound to a world value `W`.
///
/// # Examples
///
/// ```
/// use bdd_runner::{
///     FeatureImplementation, StepDefinitions, StepDescriptor, StepKeyword, StepOutcome,
/// };
///
/// let mut steps = StepDefinitions::new(0_i64)
///     .given("the counter is {n:i64}", |total, args| {
///         *total = args.parse(0)?;
///         Ok(())
///     })
///     .then("the counter is {n:i64}", |total, args| {
///         let expected: i64 = args.parse(0)?;
///         if *total == expected {
///             Ok(())
///         } else {
///             Err(format!("expected {expected}, found {total}").into())
///         }
///     });
///
/// let given = StepDescriptor::new(StepKeyword::Given, "the counter is 4", 3);
/// let then = StepDescriptor::new(StepKeyword::Then, "the counter is 5", 4);
/// assert_eq!(steps.execute_step(&given).unwrap(), StepOutcome::Passed);
/// assert!(matches!(steps.execute_step(&then).unwrap(), StepOutcome::Failed(_)));
/// ```
pub struct StepDefinitions<W> {
    world: W,
    definitions: Vec<StepDefinition<W>>,
    feature_hooks: Vec<(HookPhase, FeatureHook<W>)>,
    scenario_hooks: Vec<(HookPhase, ScenarioHook<W>)>,
}

impl<W> StepDefinitions<W> {
    /// Start with `world` and no definitions.
    pub fn new(world: W) -> Self {
        Self {
            world,
            definitions: Vec::new(),
            feature_hooks: Vec::new(),
            scenario_hooks: Vec::new(),
        }
    }

    /// Register a handler for `keyword` steps matching `pattern`.
    ///
    /// An invalid pattern is kept and reported when a step of the same
    /// keyword is executed.
    #[must_use]
    pub fn step(mut self, keyword: StepKeyword, pattern: &str, handler: StepHandler<W>) -> Self {
        self.definitions.push(StepDefinition {
            keyword,
            source: pattern.to_owned(),
            pattern: StepPattern::compile(pattern),
            handler,
        });
        self
    }

    /// Register a `Given` step.
    #[must_use]
    pub fn given(self, pattern: &str, handler: StepHandler<W>) -> Self {
        self.step(StepKeyword::Given, pattern, handler)
    }

    /// Register a `When` step.
    #[must_use]
    pub fn when(self, pattern: &str, handler: StepHandler<W>) -> Self {
        self.step(StepKeyword::When, pattern, handler)
    }

    /// Register a `Then` step.
    #[must_use]
    pub fn then(self, pattern: &str, handler: StepHandler<W>) -> Self {
        self.step(StepKeyword::Then, pattern, handler)
    }

    /// Run `hook` before the feature's first scenario.
    #[must_use]
    pub fn before(mut self, hook: FeatureHook<W>) -> Self {
        self.feature_hooks.push((HookPhase::Before, hook));
        self
    }

    /// Run `hook` after the feature's last scenario.
    #[must_use]
    pub fn after(mut self, hook: FeatureHook<W>) -> Self {
        self.feature_hooks.push((HookPhase::After, hook));
        self
    }

    /// Run `hook` before every scenario.
    #[must_use]
    pub fn before_scenario(mut self, hook: ScenarioHook<W>) -> Self {
        self.scenario_hooks.push((HookPhase::Before, hook));
        self
    }

    /// Run `hook` after every scenario.
    #[must_use]
    pub fn after_scenario(mut self, hook: ScenarioHook<W>) -> Self {
        self.scenario_hooks.push((HookPhase::After, hook));
        self
    }

    /// The world value.
    pub fn world(&self) -> &W {
        &self.world
    }

    /// Consume the definitions and return the world.
    pub fn into_world(self) -> W {
        self.world
    }

    /// Find the most specific definition matching `step`.
    ///
    /// Ties keep the definition registered first.
    fn find(
        &self,
        step: &StepDescriptor,
    ) -> Result<Option<(StepHandler<W>, Vec<String>)>, InvocationError> {
        let mut best: Option<(usize, StepHandler<W>, Vec<String>)> = None;
        for definition in self.definitions.iter().filter(|d| d.keyword == step.keyword) {
            let pattern = definition.pattern.as_ref().map_err(|source| {
                InvocationError::InvalidPattern {
                    pattern: definition.source.clone(),
                    source: source.clone(),
                }
            })?;
            let Some(captures) = pattern.captures(&step.text) else {
                continue;
            };
            let score = pattern.specificity();
            if best.as_ref().is_none_or(|(top, _, _)| score > *top) {
                best = Some((score, definition.handler, captures));
            }
        }
        Ok(best.map(|(_, handler, captures)| (handler, captures)))
    }
}

impl<W> FeatureImplementation for StepDefinitions<W> {
    fn run_hook(&mut self, phase: HookPhase, feature_name: &str) -> Result<(), HookError> {
        for (_, hook) in self.feature_hooks.iter().filter(|(p, _)| *p == phase) {
            hook(&mut self.world, feature_name)?;
        }
        Ok(())
    }

    fn run_scenario_hook(
        &mut self,
        phase: HookPhase,
        scenario: &ScenarioDescriptor,
    ) -> Result<(), HookError> {
        for (_, hook) in self.scenario_hooks.iter().filter(|(p, _)| *p == phase) {
            hook(&mut self.world, scenario)?;
        }
        Ok(())
    }

    fn execute_step(&mut self, step: &StepDescriptor) -> Result<StepOutcome, InvocationError> {
        let Some((handler, captures)) = self.find(step)? else {
            return Ok(StepOutcome::Undefined);
        };
        let args = StepArgs::new(step, captures);
        Ok(match handler(&mut self.world, &args) {
            Ok(()) => StepOutcome::Passed,
            Err(StepError::Failed(message)) => StepOutcome::Failed(message),
            Err(StepError::Pending(reason)) => StepOutcome::Pending(reason),
        })
    }
}
