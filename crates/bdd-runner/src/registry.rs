//! Resolution of feature names to their implementations.
//!
//! Two resolvers are provided. [`Registry`] is an explicit map built at run
//! time. [`InventoryRegistry`] looks at implementations submitted from
//! anywhere in the binary with the [`feature!`](crate::feature) macro.

use std::collections::BTreeMap;
use std::fmt;

use inventory::iter;

use crate::error::{RegistryError, ResolveError};
use crate::implementation::FeatureImplementation;

/// Creates a fresh implementation instance for one feature run.
pub type ImplementationFactory = fn() -> Box<dyn FeatureImplementation>;

/// Maps a feature name to a new implementation instance.
pub trait ImplementationResolver {
    /// Build the implementation registered for `feature_name`.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError`] when no single implementation is bound to
    /// the name.
    fn resolve(&self, feature_name: &str) -> Result<Box<dyn FeatureImplementation>, ResolveError>;
}

type BoxedFactory = Box<dyn Fn() -> Box<dyn FeatureImplementation>>;

/// Explicit map from feature names to implementation factories.
///
/// # Examples
///
/// ```
/// use bdd_runner::{ImplementationResolver, Registry, StepDefinitions};
///
/// let mut registry = Registry::new();
/// registry
///     .register("Cart", || Box::new(StepDefinitions::new(Vec::<u32>::new())))
///     .unwrap();
/// assert!(registry.resolve("Cart").is_ok());
/// assert!(registry.resolve("Billing").is_err());
/// ```
#[derive(Default)]
pub struct Registry {
    factories: BTreeMap<String, BoxedFactory>,
}

impl Registry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `factory` to the feature called `name`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Duplicate`] if the name is already bound.
    pub fn register<F>(
        &mut self,
        name: impl Into<String>,
        factory: F,
    ) -> Result<&mut Self, RegistryError>
    where
        F: Fn() -> Box<dyn FeatureImplementation> + 'static,
    {
        let name = name.into();
        if self.factories.contains_key(&name) {
            return Err(RegistryError::Duplicate(name));
        }
        self.factories.insert(name, Box::new(factory));
        Ok(self)
    }

    /// Whether a factory is bound to `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Registered feature names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.factories.keys().map(String::as_str)
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("features", &self.factories.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl ImplementationResolver for Registry {
    fn resolve(&self, feature_name: &str) -> Result<Box<dyn FeatureImplementation>, ResolveError> {
        self.factories
            .get(feature_name)
            .map(|factory| factory())
            .ok_or_else(|| ResolveError::ImplementationNotFound {
                name: feature_name.to_owned(),
                known: self.names().map(str::to_owned).collect(),
            })
    }
}

/// A feature implementation submitted with [`feature!`](crate::feature).
#[derive(Debug)]
pub struct FeatureRegistration {
    /// Feature name the implementation answers to.
    pub name: &'static str,
    /// Factory producing a fresh implementation.
    pub factory: ImplementationFactory,
    /// Source file of the registration.
    pub file: &'static str,
    /// Line of the registration within `file`.
    pub line: u32,
}

impl FeatureRegistration {
    fn location(&self) -> String {
        format!("{}:{}", self.file, self.line)
    }
}

inventory::collect!(FeatureRegistration);

/// Register a feature implementation with the global registry.
///
/// The factory is a path to a `fn() -> Box<dyn FeatureImplementation>`.
///
/// # Examples
///
/// ```
/// use bdd_runner::{FeatureImplementation, StepDefinitions, feature};
///
/// fn cart() -> Box<dyn FeatureImplementation> {
///     Box::new(StepDefinitions::new(Vec::<u32>::new()))
/// }
///
/// feature!("Shopping cart", cart);
/// ```
#[macro_export]
macro_rules! feature {
    ($name:expr, $factory:path $(,)?) => {
        const _: () = {
            $crate::submit! {
                $crate::FeatureRegistration {
                    name: $name,
                    factory: $factory,
                    file: file!(),
                    line: line!(),
                }
            }
        };
    };
}

/// Every implementation submitted with [`feature!`](crate::feature), ordered
/// by source location.
#[must_use]
pub fn registrations() -> Vec<&'static FeatureRegistration> {
    let mut all: Vec<_> = iter::<FeatureRegistration>.into_iter().collect();
    all.sort_by(|a, b| (a.file, a.line).cmp(&(b.file, b.line)));
    all
}

/// Resolver backed by the process-wide [`feature!`](crate::feature)
/// registrations.
#[derive(Debug, Clone, Copy, Default)]
pub struct InventoryRegistry;

impl ImplementationResolver for InventoryRegistry {
    fn resolve(&self, feature_name: &str) -> Result<Box<dyn FeatureImplementation>, ResolveError> {
        let all = registrations();
        let matching: Vec<_> = all.iter().filter(|reg| reg.name == feature_name).collect();
        match matching.as_slice() {
            [only] => {
                log::debug!(
                    "resolved feature '{feature_name}' to implementation at {}",
                    only.location()
                );
                Ok((only.factory)())
            }
            [] => {
                let mut known: Vec<String> = all.iter().map(|reg| reg.name.to_owned()).collect();
                known.sort();
                known.dedup();
                Err(ResolveError::ImplementationNotFound {
                    name: feature_name.to_owned(),
                    known,
                })
            }
            several => Err(ResolveError::DuplicateImplementation {
                name: feature_name.to_owned(),
                locations: several.iter().map(|reg| reg.location()).collect(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::StepDescriptor;
    use crate::error::InvocationError;
    use crate::implementation::StepOutcome;

    struct Noop;

    impl FeatureImplementation for Noop {
        fn execute_step(&mut self, _step: &StepDescriptor) -> Result<StepOutcome, InvocationError> {
            Ok(StepOutcome::Passed)
        }
    }

    fn noop() -> Box<dyn FeatureImplementation> {
        Box::new(Noop)
    }

    crate::feature!("Inventory twin", noop);
    crate::feature!("Inventory twin", noop);
    crate::feature!("Inventory single", noop);

    #[test]
    fn registry_rejects_duplicate_names() {
        let mut registry = Registry::new();
        assert!(registry.register("A", noop).is_ok());
        assert_eq!(
            registry.register("A", noop).err(),
            Some(RegistryError::Duplicate("A".into()))
        );
    }

    #[test]
    #[expect(clippy::unwrap_used, reason = "fresh registry accepts names")]
    fn registry_reports_known_names_when_missing() {
        let mut registry = Registry::new();
        registry.register("Beta", noop).unwrap().register("Alpha", noop).unwrap();
        let err = registry.resolve("Gamma").err();
        assert_eq!(
            err,
            Some(ResolveError::ImplementationNotFound {
                name: "Gamma".into(),
                known: vec!["Alpha".into(), "Beta".into()],
            })
        );
    }

    #[test]
    fn inventory_resolves_single_registration() {
        assert!(InventoryRegistry.resolve("Inventory single").is_ok());
    }

    #[test]
    fn inventory_flags_duplicate_registrations() {
        match InventoryRegistry.resolve("Inventory twin") {
            Err(ResolveError::DuplicateImplementation { name, locations }) => {
                assert_eq!(name, "Inventory twin");
                assert_eq!(locations.len(), 2);
                assert!(locations.iter().all(|loc| loc.contains("registry.rs")));
            }
            Err(other) => panic!("unexpected error: {other}"),
            Ok(_) => panic!("duplicate registrations must not resolve"),
        }
    }

    #[test]
    fn inventory_lists_known_features_when_missing() {
        match InventoryRegistry.resolve("Nope") {
            Err(ResolveError::ImplementationNotFound { known, .. }) => {
                assert!(known.contains(&"Inventory single".to_owned()));
            }
            Err(other) => panic!("unexpected error: {other}"),
            Ok(_) => panic!("unknown features must not resolve"),
        }
    }
}
