//! The feature runner: orchestrates one feature run.
//!
//! A run parses the feature document, resolves the implementation bound to
//! the feature name, wraps the scenarios in the implementation's `before`
//! and `after` hooks, and reports collected failures once every selected
//! scenario has run. Document and implementation are computed on first use
//! and cached for the lifetime of the runner.

use std::cell::OnceCell;
use std::path::Path;

use crate::document::{DocumentProvider, FeatureDocument, GherkinDocuments, ScenarioDescriptor};
use crate::error::RunnerError;
use crate::identifier::FeatureIdentifier;
use crate::implementation::{FeatureImplementation, HookPhase};
use crate::registry::{ImplementationResolver, InventoryRegistry};
use crate::reporting::Reporter;
use crate::scenario::ScenarioRunner;

/// Runs the scenarios of one feature file.
///
/// # Examples
///
/// ```no_run
/// use bdd_runner::{FeatureRunner, TextReporter};
///
/// let mut reporter = TextReporter::new(std::io::stdout());
/// let passed = FeatureRunner::new("features/cart.feature:12", &mut reporter)?.run()?;
/// # Ok::<(), bdd_runner::RunnerError>(())
/// ```
pub struct FeatureRunner<'a> {
    identifier: FeatureIdentifier,
    reporter: &'a mut dyn Reporter,
    provider: &'a dyn DocumentProvider,
    resolver: &'a dyn ImplementationResolver,
    document: OnceCell<FeatureDocument>,
    implementation: Option<Box<dyn FeatureImplementation>>,
}

impl<'a> FeatureRunner<'a> {
    /// Prepare a run of `identifier` (`path` or `path:line`) reporting into
    /// `reporter`.
    ///
    /// The runner reads Gherkin from disk and resolves implementations
    /// registered with [`feature!`](crate::feature) until other
    /// collaborators are supplied.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError::MalformedIdentifier`] when the identifier
    /// cannot be split into a path and line.
    pub fn new(identifier: &str, reporter: &'a mut dyn Reporter) -> Result<Self, RunnerError> {
        Ok(Self {
            identifier: FeatureIdentifier::parse(identifier)?,
            reporter,
            provider: &GherkinDocuments,
            resolver: &InventoryRegistry,
            document: OnceCell::new(),
            implementation: None,
        })
    }

    /// Read feature documents through `provider`.
    #[must_use]
    pub fn with_provider(mut self, provider: &'a dyn DocumentProvider) -> Self {
        self.provider = provider;
        self
    }

    /// Resolve implementations through `resolver`.
    #[must_use]
    pub fn with_resolver(mut self, resolver: &'a dyn ImplementationResolver) -> Self {
        self.resolver = resolver;
        self
    }

    /// The identifier this runner was built from.
    #[must_use]
    pub fn identifier(&self) -> &FeatureIdentifier {
        &self.identifier
    }

    /// The parsed feature document.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError::Document`] when the document cannot be read or
    /// parsed.
    pub fn document(&self) -> Result<&FeatureDocument, RunnerError> {
        load_document(&self.document, self.provider, self.identifier.path())
    }

    /// Name declared by the feature document.
    ///
    /// # Errors
    ///
    /// See [`document`](Self::document).
    pub fn feature_name(&self) -> Result<&str, RunnerError> {
        Ok(&self.document()?.name)
    }

    /// Scenarios of the feature in document order.
    ///
    /// # Errors
    ///
    /// See [`document`](Self::document).
    pub fn scenarios(&self) -> Result<&[ScenarioDescriptor], RunnerError> {
        Ok(&self.document()?.scenarios)
    }

    /// The implementation bound to the feature name.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError::Document`] when the feature name cannot be
    /// read and [`RunnerError::Resolve`] when no implementation matches it.
    pub fn implementation(&mut self) -> Result<&mut dyn FeatureImplementation, RunnerError> {
        let document = load_document(&self.document, self.provider, self.identifier.path())?;
        cached_implementation(&mut self.implementation, self.resolver, &document.name)
    }

    /// Run the feature and return `true` when no scenario failed.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError`] when the document, the implementation, a hook
    /// or a step invocation fails. Failing scenarios are not errors; they
    /// are sent to the reporter's error summary and turn the result `false`.
    pub fn run(&mut self) -> Result<bool, RunnerError> {
        let document = load_document(&self.document, self.provider, self.identifier.path())?;
        let feature_name = document.name.as_str();
        self.reporter.on_feature_started(feature_name);

        let mut failures = Vec::new();
        let implementation =
            cached_implementation(&mut self.implementation, self.resolver, feature_name)?;

        log::debug!("running before hook for feature '{feature_name}'");
        run_feature_hook(implementation, HookPhase::Before, feature_name)?;

        let mut selected = 0usize;
        for scenario in document
            .scenarios
            .iter()
            .filter(|scenario| self.identifier.selects(scenario.line))
        {
            selected += 1;
            log::debug!(
                "running scenario '{}' (line {}) of '{feature_name}'",
                scenario.name,
                scenario.line
            );
            let runner = ScenarioRunner::new(
                feature_name,
                &mut *implementation,
                scenario,
                &mut *self.reporter,
            );
            if let Some(failure) = runner.run()? {
                failures.push(failure);
            }
        }

        log::debug!("running after hook for feature '{feature_name}'");
        run_feature_hook(implementation, HookPhase::After, feature_name)?;

        if selected == 0 {
            if let Some(line) = self.identifier.scenario_line() {
                log::warn!(
                    "no scenario of '{feature_name}' starts on line {line} of {}",
                    self.identifier.path().display()
                );
                self.reporter.on_unmatched_line(feature_name, line);
            }
        }

        if failures.is_empty() {
            Ok(true)
        } else {
            self.reporter.on_error_summary(&failures);
            Ok(false)
        }
    }
}

fn load_document<'c>(
    cell: &'c OnceCell<FeatureDocument>,
    provider: &dyn DocumentProvider,
    path: &Path,
) -> Result<&'c FeatureDocument, RunnerError> {
    if let Some(document) = cell.get() {
        return Ok(document);
    }
    let document = provider.parse(path)?;
    Ok(cell.get_or_init(|| document))
}

fn cached_implementation<'s>(
    slot: &'s mut Option<Box<dyn FeatureImplementation>>,
    resolver: &dyn ImplementationResolver,
    feature_name: &str,
) -> Result<&'s mut dyn FeatureImplementation, RunnerError> {
    let implementation = match slot.take() {
        Some(existing) => existing,
        None => resolver.resolve(feature_name)?,
    };
    Ok(&mut **slot.insert(implementation))
}

fn run_feature_hook(
    implementation: &mut dyn FeatureImplementation,
    phase: HookPhase,
    feature_name: &str,
) -> Result<(), RunnerError> {
    implementation
        .run_hook(phase, feature_name)
        .map_err(|source| RunnerError::FeatureHook {
            phase,
            feature: feature_name.to_owned(),
            source,
        })
}
