//! Gherkin-backed document provider.

use std::path::Path;

use gherkin::GherkinEnv;

use super::{DocumentProvider, FeatureDocument, ScenarioDescriptor, StepDescriptor};
use crate::error::DocumentError;

/// Reads `.feature` files from disk and parses them with `gherkin`.
#[derive(Debug, Clone, Copy, Default)]
pub struct GherkinDocuments;

impl DocumentProvider for GherkinDocuments {
    fn parse(&self, path: &Path) -> Result<FeatureDocument, DocumentError> {
        let mut text = std::fs::read_to_string(path).map_err(|source| DocumentError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        normalise_trailing_newline(&mut text);
        parse_feature_text(path, &text)
    }
}

fn normalise_trailing_newline(text: &mut String) {
    if !text.ends_with('\n') {
        text.push('\n');
    }
}

/// Parse feature `text` as though it had been read from `path`.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use bdd_runner::parse_feature_text;
///
/// let text = "Feature: Cart\n  Scenario: empty\n    Given an empty cart\n";
/// let document = parse_feature_text(Path::new("cart.feature"), text).unwrap();
/// assert_eq!(document.name, "Cart");
/// assert_eq!(document.scenarios[0].line, 2);
/// ```
///
/// # Errors
///
/// Returns [`DocumentError::Parse`] when the text is not valid Gherkin.
pub fn parse_feature_text(path: &Path, text: &str) -> Result<FeatureDocument, DocumentError> {
    let feature = gherkin::Feature::parse(text, GherkinEnv::default()).map_err(|err| {
        DocumentError::Parse {
            path: path.to_path_buf(),
            message: err.to_string(),
        }
    })?;
    Ok(flatten_feature(path, &feature, text))
}

fn flatten_feature(path: &Path, feature: &gherkin::Feature, source: &str) -> FeatureDocument {
    let background = background_steps(feature.background.as_ref());
    let mut scenarios = Vec::new();
    for scenario in &feature.scenarios {
        expand_scenario(scenario, &background, &[], source, &mut scenarios);
    }
    for rule in &feature.rules {
        let mut rule_background = background.clone();
        rule_background.extend(background_steps(rule.background.as_ref()));
        for scenario in &rule.scenarios {
            expand_scenario(scenario, &rule_background, &rule.tags, source, &mut scenarios);
        }
    }
    FeatureDocument {
        name: feature.name.clone(),
        path: path.to_path_buf(),
        description: feature.description.clone(),
        tags: merge_tags(&[], &feature.tags),
        scenarios,
    }
}

fn background_steps(background: Option<&gherkin::Background>) -> Vec<StepDescriptor> {
    background
        .map(|bg| bg.steps.iter().map(convert_step).collect())
        .unwrap_or_default()
}

fn convert_step(step: &gherkin::Step) -> StepDescriptor {
    StepDescriptor {
        keyword: step.ty.into(),
        keyword_text: step.keyword.trim().to_owned(),
        text: step.value.clone(),
        line: to_line(step.position.line),
        docstring: step.docstring.clone(),
        table: step.table.as_ref().map(|table| table.rows.clone()),
    }
}

/// Append `additions` to `base` with a leading `@`, skipping duplicates.
fn merge_tags(base: &[String], additions: &[String]) -> Vec<String> {
    let mut merged = base.to_vec();
    for tag in additions {
        let formatted = if tag.starts_with('@') {
            tag.clone()
        } else {
            format!("@{tag}")
        };
        if !merged.contains(&formatted) {
            merged.push(formatted);
        }
    }
    merged
}

fn to_line(line: usize) -> u32 {
    u32::try_from(line).unwrap_or(u32::MAX)
}

/// A single row of an outline's examples, with its header row.
struct ExampleRow<'a> {
    line: u32,
    headers: &'a [String],
    values: &'a [String],
    tags: &'a [String],
}

impl ExampleRow<'_> {
    fn substitute(&self, template: &str) -> String {
        self.headers
            .iter()
            .zip(self.values)
            .fold(template.to_owned(), |text, (header, value)| {
                text.replace(&format!("<{header}>"), value)
            })
    }

    fn apply(&self, step: &StepDescriptor) -> StepDescriptor {
        StepDescriptor {
            text: self.substitute(&step.text),
            docstring: step.docstring.as_deref().map(|doc| self.substitute(doc)),
            table: step.table.as_ref().map(|rows| {
                rows.iter()
                    .map(|row| row.iter().map(|cell| self.substitute(cell)).collect())
                    .collect()
            }),
            ..step.clone()
        }
    }
}

/// Lines of the first `count` table rows at or after `first_line`.
///
/// `gherkin` only records where a table starts, so row lines are read back
/// from the source, skipping comments and blank lines between rows.
fn table_row_lines(source: &str, first_line: usize, count: usize) -> Vec<usize> {
    source
        .lines()
        .enumerate()
        .skip(first_line.saturating_sub(1))
        .filter(|(_, line)| line.trim_start().starts_with('|'))
        .take(count)
        .map(|(index, _)| index + 1)
        .collect()
}

fn example_rows<'a>(examples: &'a gherkin::Examples, source: &str) -> Vec<ExampleRow<'a>> {
    let Some(table) = examples.table.as_ref() else {
        return Vec::new();
    };
    let row_lines = table_row_lines(source, table.position.line, table.rows.len());
    let mut rows = table.rows.iter();
    let Some(headers) = rows.next() else {
        return Vec::new();
    };
    rows.enumerate()
        .map(|(offset, values)| {
            let line = row_lines
                .get(offset + 1)
                .copied()
                .unwrap_or_else(|| table.position.line.saturating_add(offset + 1));
            ExampleRow {
                line: to_line(line),
                headers,
                values,
                tags: &examples.tags,
            }
        })
        .collect()
}

fn expand_scenario(
    scenario: &gherkin::Scenario,
    background: &[StepDescriptor],
    inherited_tags: &[String],
    source: &str,
    out: &mut Vec<ScenarioDescriptor>,
) {
    let tags = merge_tags(inherited_tags, &scenario.tags);
    let steps: Vec<StepDescriptor> = scenario.steps.iter().map(convert_step).collect();

    if scenario.examples.is_empty() {
        out.push(ScenarioDescriptor {
            keyword: scenario.keyword.clone(),
            name: scenario.name.clone(),
            line: to_line(scenario.position.line),
            tags,
            background: background.to_vec(),
            steps,
        });
        return;
    }

    for row in scenario
        .examples
        .iter()
        .flat_map(|examples| example_rows(examples, source))
    {
        let row_tags = merge_tags(&tags, row.tags);
        out.push(ScenarioDescriptor {
            keyword: scenario.keyword.clone(),
            name: row.substitute(&scenario.name),
            line: row.line,
            tags: row_tags,
            background: background.to_vec(),
            steps: steps.iter().map(|step| row.apply(step)).collect(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keyword::StepKeyword;

    #[expect(clippy::expect_used, reason = "fixtures are valid Gherkin")]
    fn parse(text: &str) -> FeatureDocument {
        parse_feature_text(Path::new("test.feature"), text).expect("feature should parse")
    }

    #[test]
    fn resolves_conjunction_keywords() {
        let doc = parse(
            "Feature: F\n  Scenario: S\n    Given a\n    And b\n    When c\n    But d\n",
        );
        let steps: Vec<_> = doc
            .scenarios
            .iter()
            .flat_map(|s| s.steps.iter())
            .map(|s| (s.keyword, s.keyword_text.as_str(), s.text.as_str()))
            .collect();
        assert_eq!(
            steps,
            vec![
                (StepKeyword::Given, "Given", "a"),
                (StepKeyword::Given, "And", "b"),
                (StepKeyword::When, "When", "c"),
                (StepKeyword::When, "But", "d"),
            ]
        );
    }

    #[test]
    fn outline_rows_substitute_placeholders() {
        let doc = parse(concat!(
            "Feature: F\n",
            "  Scenario Outline: adding <a>\n",
            "    Given the number <a>\n",
            "    Then the total is <total>\n",
            "\n",
            "    Examples:\n",
            "      | a | total |\n",
            "      | 1 | 1     |\n",
            "      | 2 | 2     |\n",
        ));
        let lines: Vec<u32> = doc.scenarios.iter().map(|s| s.line).collect();
        assert_eq!(lines, vec![8, 9]);
        let names: Vec<&str> = doc.scenarios.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["adding 1", "adding 2"]);
        let texts: Vec<&str> = doc
            .scenarios
            .iter()
            .flat_map(|s| s.steps.iter().map(|step| step.text.as_str()))
            .collect();
        assert_eq!(
            texts,
            vec!["the number 1", "the total is 1", "the number 2", "the total is 2"]
        );
    }

    #[test]
    fn outline_rows_keep_their_own_lines_across_comments_and_blanks() {
        let doc = parse(concat!(
            "Feature: F\n",
            "  Scenario Outline: value <v>\n",
            "    Given the number <v>\n",
            "\n",
            "    Examples:\n",
            "      | v |\n",
            "      # the first row\n",
            "      | 1 |\n",
            "\n",
            "      | 2 |\n",
        ));
        let rows: Vec<(&str, u32)> = doc
            .scenarios
            .iter()
            .map(|s| (s.name.as_str(), s.line))
            .collect();
        assert_eq!(rows, vec![("value 1", 8), ("value 2", 10)]);
    }

    #[test]
    fn table_row_lines_skip_non_row_lines() {
        let source = "a\n| h |\n# note\n| 1 |\n\n  | 2 |\n| 3 |\n";
        assert_eq!(table_row_lines(source, 2, 3), vec![2, 4, 6]);
    }

    #[test]
    fn missing_trailing_newline_is_tolerated() {
        let mut text = String::from("Feature: F\n  Scenario: S\n    Given a");
        normalise_trailing_newline(&mut text);
        assert!(text.ends_with('\n'));
        assert_eq!(parse(&text).scenarios.len(), 1);
    }
}
