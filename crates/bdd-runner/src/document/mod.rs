//! Parsed feature documents and the providers that produce them.
//!
//! A [`FeatureDocument`] is a flattened view of a Gherkin feature: background
//! steps are attached to every scenario, rule scenarios follow the top-level
//! ones, and scenario outlines are expanded into one scenario per example
//! row. Runners never look at raw Gherkin.

mod parser;

use std::path::{Path, PathBuf};

pub use parser::{GherkinDocuments, parse_feature_text};

use crate::error::DocumentError;
use crate::keyword::StepKeyword;

/// A parsed feature ready for execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureDocument {
    /// Name declared after the `Feature:` keyword.
    pub name: String,
    /// File the feature was read from.
    pub path: PathBuf,
    /// Free-form description under the feature title.
    pub description: Option<String>,
    /// Tags attached to the feature, each with a leading `@`.
    pub tags: Vec<String>,
    /// Scenarios in document order.
    pub scenarios: Vec<ScenarioDescriptor>,
}

impl FeatureDocument {
    /// Create an empty document called `name` located at `path`.
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            description: None,
            tags: Vec::new(),
            scenarios: Vec::new(),
        }
    }

    /// Append a scenario.
    #[must_use]
    pub fn with_scenario(mut self, scenario: ScenarioDescriptor) -> Self {
        self.scenarios.push(scenario);
        self
    }
}

/// One executable scenario.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScenarioDescriptor {
    /// Keyword as written, for example `Scenario` or `Scenario Outline`.
    pub keyword: String,
    /// Scenario title.
    pub name: String,
    /// Source line; for expanded outlines, the line of the example row.
    pub line: u32,
    /// Tags from the enclosing rule, the scenario and its examples block.
    pub tags: Vec<String>,
    /// Background steps run before `steps`.
    pub background: Vec<StepDescriptor>,
    /// Steps declared by the scenario itself.
    pub steps: Vec<StepDescriptor>,
}

impl ScenarioDescriptor {
    /// Create a plain `Scenario` without steps.
    pub fn new(name: impl Into<String>, line: u32) -> Self {
        Self {
            keyword: "Scenario".to_owned(),
            name: name.into(),
            line,
            tags: Vec::new(),
            background: Vec::new(),
            steps: Vec::new(),
        }
    }

    /// Append a scenario step.
    #[must_use]
    pub fn with_step(mut self, step: StepDescriptor) -> Self {
        self.steps.push(step);
        self
    }

    /// Append a background step.
    #[must_use]
    pub fn with_background_step(mut self, step: StepDescriptor) -> Self {
        self.background.push(step);
        self
    }

    /// Background steps followed by scenario steps, in execution order.
    pub fn all_steps(&self) -> impl Iterator<Item = &StepDescriptor> {
        self.background.iter().chain(&self.steps)
    }
}

/// One step of a scenario.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepDescriptor {
    /// Keyword after resolving `And`/`But`.
    pub keyword: StepKeyword,
    /// Keyword exactly as written, for example `And`.
    pub keyword_text: String,
    /// Step text following the keyword.
    pub text: String,
    /// Source line.
    pub line: u32,
    /// Attached doc string, if any.
    pub docstring: Option<String>,
    /// Attached data table rows, if any.
    pub table: Option<Vec<Vec<String>>>,
}

impl StepDescriptor {
    /// Create a step whose written keyword matches its resolved keyword.
    ///
    /// # Examples
    ///
    /// ```
    /// use bdd_runner::{StepDescriptor, StepKeyword};
    ///
    /// let step = StepDescriptor::new(StepKeyword::Given, "a cart", 4);
    /// assert_eq!(step.keyword_text, "Given");
    /// ```
    pub fn new(keyword: StepKeyword, text: impl Into<String>, line: u32) -> Self {
        Self {
            keyword,
            keyword_text: keyword.as_str().to_owned(),
            text: text.into(),
            line,
            docstring: None,
            table: None,
        }
    }

    /// Attach a doc string.
    #[must_use]
    pub fn with_docstring(mut self, docstring: impl Into<String>) -> Self {
        self.docstring = Some(docstring.into());
        self
    }

    /// Attach a data table.
    #[must_use]
    pub fn with_table(mut self, table: Vec<Vec<String>>) -> Self {
        self.table = Some(table);
        self
    }
}

/// Source of parsed feature documents.
pub trait DocumentProvider {
    /// Parse the feature stored at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError`] when the file cannot be read or is not a
    /// valid feature.
    fn parse(&self, path: &Path) -> Result<FeatureDocument, DocumentError>;
}
