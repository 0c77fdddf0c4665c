//! Arguments handed to step handlers.

use std::fmt::Display;
use std::str::FromStr;

use crate::document::StepDescriptor;
use crate::error::StepError;

/// Placeholder captures and attachments of the step being executed.
#[derive(Debug)]
pub struct StepArgs<'a> {
    step: &'a StepDescriptor,
    captures: Vec<String>,
}

impl<'a> StepArgs<'a> {
    /// Bundle the values captured from `step`.
    #[must_use]
    pub fn new(step: &'a StepDescriptor, captures: Vec<String>) -> Self {
        Self { step, captures }
    }

    /// The step being executed.
    #[must_use]
    pub fn step(&self) -> &'a StepDescriptor {
        self.step
    }

    /// Raw text captured by the placeholder at `index`.
    #[must_use]
    pub fn capture(&self, index: usize) -> Option<&str> {
        self.captures.get(index).map(String::as_str)
    }

    /// All captured values in placeholder order.
    #[must_use]
    pub fn captures(&self) -> &[String] {
        &self.captures
    }

    /// Parse the capture at `index` into `T`.
    ///
    /// # Examples
    ///
    /// ```
    /// use bdd_runner::{StepArgs, StepDescriptor, StepKeyword};
    ///
    /// let step = StepDescriptor::new(StepKeyword::Given, "I have 3 apples", 2);
    /// let args = StepArgs::new(&step, vec!["3".to_owned()]);
    /// assert_eq!(args.parse::<u32>(0).unwrap(), 3);
    /// assert!(args.parse::<u32>(1).is_err());
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`StepError::Failed`] when the capture is missing or does not
    /// parse.
    pub fn parse<T>(&self, index: usize) -> Result<T, StepError>
    where
        T: FromStr,
        T::Err: Display,
    {
        let raw = self.capture(index).ok_or_else(|| {
            StepError::failed(format!(
                "step '{}' has no capture at index {index}",
                self.step.text
            ))
        })?;
        raw.parse().map_err(|err| {
            StepError::failed(format!("cannot parse '{raw}' from step '{}': {err}", self.step.text))
        })
    }

    /// Doc string attached to the step.
    #[must_use]
    pub fn docstring(&self) -> Option<&'a str> {
        self.step.docstring.as_deref()
    }

    /// Data table attached to the step.
    #[must_use]
    pub fn table(&self) -> Option<&'a [Vec<String>]> {
        self.step.table.as_deref()
    }
}
