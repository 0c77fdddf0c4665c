//! A four-function calculator exercised by the feature files in
//! `features/`.
//!
//! The step definitions are bound to the `Addition`, `Division` and `Memory`
//! features with [`feature!`]. The binary target hands them to
//! `bdd_runner_cli`.

use bdd_runner::{
    FeatureImplementation, InventoryRegistry, StepArgs, StepDefinitions, StepError, feature,
};

/// Calculator state shared by the steps of a feature.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Calculator {
    display: i64,
    memory: Option<i64>,
    error: Option<String>,
}

impl Calculator {
    /// Reset the display, memory and error state.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Replace the display with `value`.
    pub fn enter(&mut self, value: i64) {
        self.display = value;
    }

    /// Add `value` to the display, saturating at the integer bounds.
    pub fn add(&mut self, value: i64) {
        self.display = self.display.saturating_add(value);
    }

    /// Divide the display by `divisor`, recording an error on failure.
    pub fn divide(&mut self, divisor: i64) {
        match self.display.checked_div(divisor) {
            Some(quotient) => self.display = quotient,
            None if divisor == 0 => self.error = Some("division by zero".to_owned()),
            None => self.error = Some("overflow".to_owned()),
        }
    }

    /// Copy the display into memory.
    pub fn store(&mut self) {
        self.memory = Some(self.display);
    }

    /// Copy memory onto the display. Returns `false` when memory is empty.
    pub fn recall(&mut self) -> bool {
        let Some(value) = self.memory else {
            return false;
        };
        self.display = value;
        true
    }

    /// Current display value.
    #[must_use]
    pub fn display(&self) -> i64 {
        self.display
    }

    /// Last error, if any.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

fn sum_column(args: &StepArgs<'_>) -> Result<i64, StepError> {
    let table = args
        .table()
        .ok_or_else(|| StepError::failed("expected a data table"))?;
    table.iter().skip(1).try_fold(0_i64, |total, row| {
        let cell = row
            .first()
            .ok_or_else(|| StepError::failed("empty table row"))?;
        let value: i64 = cell
            .trim()
            .parse()
            .map_err(|err| StepError::failed(format!("invalid value '{cell}': {err}")))?;
        Ok(total.saturating_add(value))
    })
}

/// Step definitions for the calculator features.
#[must_use]
pub fn steps() -> StepDefinitions<Calculator> {
    StepDefinitions::new(Calculator::default())
        .before_scenario(|calc, _| {
            calc.clear();
            Ok(())
        })
        .given("a cleared calculator", |calc, _| {
            calc.clear();
            Ok(())
        })
        .when("I enter {value:i64}", |calc, args| {
            calc.enter(args.parse(0)?);
            Ok(())
        })
        .when("I add {value:i64}", |calc, args| {
            calc.add(args.parse(0)?);
            Ok(())
        })
        .when("I divide by {divisor:i64}", |calc, args| {
            calc.divide(args.parse(0)?);
            Ok(())
        })
        .when("I store the display in memory", |calc, _| {
            calc.store();
            Ok(())
        })
        .when("I recall memory", |calc, _| {
            if calc.recall() {
                Ok(())
            } else {
                Err(StepError::failed("memory is empty"))
            }
        })
        .when("I sum the values", |calc, args| {
            calc.enter(sum_column(args)?);
            Ok(())
        })
        .when("I take the square root", |_, _| {
            Err(StepError::pending_with("square roots are not implemented"))
        })
        .then("the display shows {expected:i64}", |calc, args| {
            let expected: i64 = args.parse(0)?;
            if calc.display() == expected {
                Ok(())
            } else {
                Err(StepError::failed(format!(
                    "expected {expected}, display shows {}",
                    calc.display()
                )))
            }
        })
        .then("the calculator reports \"{message}\"", |calc, args| {
            match (calc.error(), args.capture(0)) {
                (Some(actual), Some(expected)) if actual == expected => Ok(()),
                (actual, expected) => Err(StepError::failed(format!(
                    "expected error {expected:?}, found {actual:?}"
                ))),
            }
        })
}

fn calculator_steps() -> Box<dyn FeatureImplementation> {
    Box::new(steps())
}

feature!("Addition", calculator_steps);
feature!("Division", calculator_steps);
feature!("Memory", calculator_steps);

/// Resolver over every feature registered by this crate.
#[must_use]
pub fn resolver() -> InventoryRegistry {
    InventoryRegistry
}
