//! Resolved step keywords.
//!
//! Gherkin conjunctions (`And`, `But`, `*`) take the meaning of the preceding
//! primary keyword. The parser resolves them, so a [`StepKeyword`] is always
//! one of `Given`, `When` or `Then`.

use std::fmt;

use gherkin::StepType;

/// Semantic keyword of a step after conjunctions are resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StepKeyword {
    /// Setup preconditions for a scenario.
    Given,
    /// Perform the action under test.
    When,
    /// Assert the expected outcome.
    Then,
}

impl StepKeyword {
    /// Return the keyword as a string slice.
    ///
    /// # Examples
    ///
    /// ```
    /// use bdd_runner::StepKeyword;
    ///
    /// assert_eq!(StepKeyword::When.as_str(), "When");
    /// ```
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Given => "Given",
            Self::When => "When",
            Self::Then => "Then",
        }
    }
}

impl fmt::Display for StepKeyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<StepType> for StepKeyword {
    fn from(ty: StepType) -> Self {
        match ty {
            StepType::Given => Self::Given,
            StepType::When => Self::When,
            StepType::Then => Self::Then,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(StepType::Given, StepKeyword::Given)]
    #[case(StepType::When, StepKeyword::When)]
    #[case(StepType::Then, StepKeyword::Then)]
    fn maps_step_type(#[case] ty: StepType, #[case] expected: StepKeyword) {
        assert_eq!(StepKeyword::from(ty), expected);
    }

    #[test]
    fn display_matches_as_str() {
        assert_eq!(StepKeyword::Then.to_string(), "Then");
    }
}
