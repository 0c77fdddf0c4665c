//! Sequential runs over several feature identifiers.

use crate::document::{DocumentProvider, GherkinDocuments};
use crate::error::RunnerError;
use crate::feature::FeatureRunner;
use crate::registry::{ImplementationResolver, InventoryRegistry};
use crate::reporting::Reporter;

/// An ordered list of feature identifiers run one after another.
///
/// # Examples
///
/// ```no_run
/// use bdd_runner::{Suite, TextReporter};
///
/// let suite = Suite::new(["features/cart.feature", "features/billing.feature:8"])
///     .fail_fast(true);
/// let mut reporter = TextReporter::new(std::io::stdout());
/// let success = suite.run(&mut reporter)?;
/// # Ok::<(), bdd_runner::RunnerError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Suite {
    identifiers: Vec<String>,
    fail_fast: bool,
}

impl Suite {
    /// Create a suite over `identifiers`.
    pub fn new<I, S>(identifiers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            identifiers: identifiers.into_iter().map(Into::into).collect(),
            fail_fast: false,
        }
    }

    /// Stop after the first feature that returns `false`.
    #[must_use]
    pub fn fail_fast(mut self, enabled: bool) -> Self {
        self.fail_fast = enabled;
        self
    }

    /// Identifiers in run order.
    #[must_use]
    pub fn identifiers(&self) -> &[String] {
        &self.identifiers
    }

    /// Run with the Gherkin provider and the global registry.
    ///
    /// # Errors
    ///
    /// See [`run_with`](Self::run_with).
    pub fn run(&self, reporter: &mut dyn Reporter) -> Result<bool, RunnerError> {
        self.run_with(reporter, &GherkinDocuments, &InventoryRegistry)
    }

    /// Run every feature with fresh runners built on `provider` and
    /// `resolver`, returning `true` when every feature passed.
    ///
    /// # Errors
    ///
    /// Returns the first fatal [`RunnerError`]; later features do not run.
    pub fn run_with(
        &self,
        reporter: &mut dyn Reporter,
        provider: &dyn DocumentProvider,
        resolver: &dyn ImplementationResolver,
    ) -> Result<bool, RunnerError> {
        let mut success = true;
        for identifier in &self.identifiers {
            let passed = FeatureRunner::new(identifier, &mut *reporter)?
                .with_provider(provider)
                .with_resolver(resolver)
                .run()?;
            success &= passed;
            if !passed && self.fail_fast {
                log::info!("stopping after failing feature '{identifier}'");
                break;
            }
        }
        reporter.on_run_finished(success);
        Ok(success)
    }
}
