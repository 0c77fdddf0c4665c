//! Gherkin feature runner.
//!
//! `bdd-runner` executes the scenarios of a feature file against the code
//! registered for that feature. A [`FeatureRunner`] parses the document,
//! resolves the implementation bound to the feature name, runs its hooks and
//! every selected scenario, and reports a pass/fail verdict. Identifiers of
//! the form `path:line` restrict a run to the scenario declared on that line.
//!
//! Implementations are usually built with [`StepDefinitions`] and registered
//! with the [`feature!`] macro:
//!
//! ```
//! use bdd_runner::{FeatureImplementation, StepDefinitions, StepError, feature};
//!
//! #[derive(Default)]
//! struct Cart {
//!     items: Vec<String>,
//! }
//!
//! fn cart_steps() -> Box<dyn FeatureImplementation> {
//!     Box::new(
//!         StepDefinitions::new(Cart::default())
//!             .when("I add {item}", |cart, args| {
//!                 cart.items.push(args.captures().concat());
//!                 Ok(())
//!             })
//!             .then("the cart holds {count:usize} items", |cart, args| {
//!                 let expected: usize = args.parse(0)?;
//!                 if cart.items.len() == expected {
//!                     Ok(())
//!                 } else {
//!                     Err(StepError::failed(format!("cart holds {}", cart.items.len())))
//!                 }
//!             }),
//!     )
//! }
//!
//! feature!("Shopping cart", cart_steps);
//! ```

mod document;
mod error;
mod failure;
mod feature;
mod identifier;
mod implementation;
mod keyword;
mod panic;
mod registry;
pub mod reporting;
mod scenario;
mod steps;
mod suite;

/// Scripted collaborators for exercising the runners.
///
/// Hidden from documentation; intended for this crate's tests and for
/// downstream test suites.
#[cfg(any(test, feature = "test-support"))]
#[doc(hidden)]
pub mod test_support;

pub use document::{
    DocumentProvider, FeatureDocument, GherkinDocuments, ScenarioDescriptor, StepDescriptor,
    parse_feature_text,
};
pub use error::{
    DocumentError, HookError, InvocationError, RegistryError, ResolveError, RunnerError,
    StepError,
};
pub use failure::{FailedStep, FailureReason, ScenarioFailure};
pub use feature::FeatureRunner;
pub use identifier::FeatureIdentifier;
pub use implementation::{FeatureImplementation, HookPhase, StepOutcome};
pub use inventory::{iter, submit};
pub use keyword::StepKeyword;
pub use panic::panic_message;
pub use registry::{
    FeatureRegistration, ImplementationFactory, ImplementationResolver, InventoryRegistry,
    Registry, registrations,
};
#[cfg(feature = "json")]
pub use reporting::json::JsonReporter;
pub use reporting::{NullReporter, RecordingReporter, ReportEvent, Reporter, StepStatus, TextReporter};
pub use scenario::ScenarioRunner;
pub use steps::{
    FeatureHook, PatternError, ScenarioHook, StepArgs, StepDefinitions, StepHandler, StepPattern,
};
pub use suite::Suite;
