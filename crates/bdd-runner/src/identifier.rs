//! Feature identifiers of the form `path` or `path:line`.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::RunnerError;

/// A feature file path with an optional scenario line selector.
///
/// The selector is kept as written and compared with the textual form of a
/// scenario's line, so `a.feature:007` selects nothing while
/// `a.feature:7` selects the scenario starting on line 7.
///
/// # Examples
///
/// ```
/// use bdd_runner::FeatureIdentifier;
///
/// let id = FeatureIdentifier::parse("features/cart.feature:12").unwrap();
/// assert_eq!(id.path().to_str(), Some("features/cart.feature"));
/// assert_eq!(id.scenario_line(), Some("12"));
/// assert!(id.selects(12));
/// assert!(!id.selects(4));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureIdentifier {
    path: PathBuf,
    scenario_line: Option<String>,
}

impl FeatureIdentifier {
    /// Split `identifier` into its path and optional line selector.
    ///
    /// Only a run of ASCII digits after the last `:` counts as a selector;
    /// any other suffix stays part of the path.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError::MalformedIdentifier`] when the identifier is
    /// empty, has nothing before the selector, or ends with a bare `:`.
    pub fn parse(identifier: &str) -> Result<Self, RunnerError> {
        let malformed = |reason| RunnerError::MalformedIdentifier {
            identifier: identifier.to_owned(),
            reason,
        };
        if identifier.trim().is_empty() {
            return Err(malformed("identifier is empty"));
        }
        let Some((path, suffix)) = identifier.rsplit_once(':') else {
            return Ok(Self::whole_path(identifier));
        };
        if suffix.is_empty() {
            return Err(malformed("missing line number after ':'"));
        }
        if !suffix.bytes().all(|byte| byte.is_ascii_digit()) {
            return Ok(Self::whole_path(identifier));
        }
        if path.is_empty() {
            return Err(malformed("missing feature path before ':'"));
        }
        Ok(Self {
            path: PathBuf::from(path),
            scenario_line: Some(suffix.to_owned()),
        })
    }

    fn whole_path(identifier: &str) -> Self {
        Self {
            path: PathBuf::from(identifier),
            scenario_line: None,
        }
    }

    /// Path of the feature file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Line selector as written, if any.
    #[must_use]
    pub fn scenario_line(&self) -> Option<&str> {
        self.scenario_line.as_deref()
    }

    /// Whether a scenario declared on `line` takes part in the run.
    #[must_use]
    pub fn selects(&self, line: u32) -> bool {
        self.scenario_line
            .as_deref()
            .is_none_or(|selector| selector == line.to_string())
    }
}

impl FromStr for FeatureIdentifier {
    type Err = RunnerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for FeatureIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path.display())?;
        if let Some(line) = &self.scenario_line {
            write!(f, ":{line}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("features/a.feature", "features/a.feature", None)]
    #[case("features/a.feature:12", "features/a.feature", Some("12"))]
    #[case("C:/work/a.feature", "C:/work/a.feature", None)]
    #[case("C:/work/a.feature:3", "C:/work/a.feature", Some("3"))]
    #[case("odd:name.feature", "odd:name.feature", None)]
    #[case("a.feature:007", "a.feature", Some("007"))]
    fn splits_path_and_selector(
        #[case] input: &str,
        #[case] path: &str,
        #[case] line: Option<&str>,
    ) {
        #[expect(clippy::unwrap_used, reason = "valid identifiers must parse")]
        let id = FeatureIdentifier::parse(input).unwrap();
        assert_eq!(id.path(), Path::new(path));
        assert_eq!(id.scenario_line(), line);
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("a.feature:")]
    #[case(":12")]
    fn rejects_malformed_identifiers(#[case] input: &str) {
        let err = FeatureIdentifier::parse(input);
        assert!(
            matches!(err, Err(RunnerError::MalformedIdentifier { .. })),
            "expected malformed identifier error for {input:?}"
        );
    }

    #[rstest]
    #[case("a.feature", 3, true)]
    #[case("a.feature:3", 3, true)]
    #[case("a.feature:3", 30, false)]
    #[case("a.feature:007", 7, false)]
    fn selection_compares_textual_lines(
        #[case] input: &str,
        #[case] line: u32,
        #[case] expected: bool,
    ) {
        #[expect(clippy::unwrap_used, reason = "valid identifiers must parse")]
        let id: FeatureIdentifier = input.parse().unwrap();
        assert_eq!(id.selects(line), expected);
    }

    #[test]
    fn display_round_trips_selector() {
        #[expect(clippy::unwrap_used, reason = "valid identifiers must parse")]
        let id = FeatureIdentifier::parse("a.feature:9").unwrap();
        assert_eq!(id.to_string(), "a.feature:9");
    }
}
