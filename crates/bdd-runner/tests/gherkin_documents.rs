//! Tests for reading feature files from disk.

use std::fs;
use std::path::Path;

use bdd_runner::{DocumentError, DocumentProvider, GherkinDocuments, StepKeyword};
use rstest::{fixture, rstest};
use tempfile::TempDir;

const SHOPPING: &str = "\
@shop
Feature: Shopping
  Background:
    Given an empty cart

  Scenario: adding an item
    When I add apples
    Then the cart holds 1 items

  @outline
  Scenario Outline: adding <count> items
    When I add <count> pears
    Then the cart holds <count> items
      \"\"\"
      <count> pears
      \"\"\"

    @examples
    Examples:
      | count |
      | 2     |
      | 3     |

  Rule: loyalty
    Background:
      Given a loyalty card

    @rule-scenario
    Scenario: discount
      Then a discount applies
        | rate | <none> |
        | 5    | 10     |";

#[fixture]
fn shopping_dir() -> TempDir {
    let dir = TempDir::new().unwrap_or_else(|err| panic!("temp dir: {err}"));
    fs::write(dir.path().join("shopping.feature"), SHOPPING)
        .unwrap_or_else(|err| panic!("write feature: {err}"));
    dir
}

fn parse(path: &Path) -> bdd_runner::FeatureDocument {
    GherkinDocuments
        .parse(path)
        .unwrap_or_else(|err| panic!("feature should parse: {err}"))
}

#[rstest]
fn flattens_backgrounds_outlines_and_rules(shopping_dir: TempDir) {
    let document = parse(&shopping_dir.path().join("shopping.feature"));

    assert_eq!(document.name, "Shopping");
    assert_eq!(document.tags, vec!["@shop".to_owned()]);
    let summary: Vec<(&str, u32)> = document
        .scenarios
        .iter()
        .map(|s| (s.name.as_str(), s.line))
        .collect();
    assert_eq!(
        summary,
        vec![
            ("adding an item", 6),
            ("adding 2 items", 21),
            ("adding 3 items", 22),
            ("discount", 29),
        ]
    );
}

#[rstest]
fn attaches_background_steps_to_every_scenario(shopping_dir: TempDir) {
    let document = parse(&shopping_dir.path().join("shopping.feature"));

    let backgrounds: Vec<Vec<&str>> = document
        .scenarios
        .iter()
        .map(|s| s.background.iter().map(|step| step.text.as_str()).collect())
        .collect();
    assert_eq!(
        backgrounds,
        vec![
            vec!["an empty cart"],
            vec!["an empty cart"],
            vec!["an empty cart"],
            vec!["an empty cart", "a loyalty card"],
        ]
    );
    let first = document.scenarios.first().unwrap_or_else(|| panic!("no scenarios"));
    let keywords: Vec<StepKeyword> = first.all_steps().map(|step| step.keyword).collect();
    assert_eq!(
        keywords,
        vec![StepKeyword::Given, StepKeyword::When, StepKeyword::Then]
    );
}

#[rstest]
fn outline_rows_substitute_docstrings_and_tags(shopping_dir: TempDir) {
    let document = parse(&shopping_dir.path().join("shopping.feature"));

    let outline = document
        .scenarios
        .iter()
        .find(|s| s.line == 22)
        .unwrap_or_else(|| panic!("expanded row missing"));
    let texts: Vec<&str> = outline.steps.iter().map(|s| s.text.as_str()).collect();
    assert_eq!(texts, vec!["I add 3 pears", "the cart holds 3 items"]);
    let doc = outline
        .steps
        .last()
        .and_then(|s| s.docstring.as_deref())
        .unwrap_or_default();
    assert!(doc.contains("3 pears"), "docstring was {doc:?}");
    assert!(outline.tags.contains(&"@outline".to_owned()));
    assert!(outline.tags.contains(&"@examples".to_owned()));
}

#[rstest]
fn keeps_tables_and_rule_tags(shopping_dir: TempDir) {
    let document = parse(&shopping_dir.path().join("shopping.feature"));

    let rule_scenario = document
        .scenarios
        .last()
        .unwrap_or_else(|| panic!("no scenarios"));
    assert!(rule_scenario.tags.contains(&"@rule-scenario".to_owned()));
    let table = rule_scenario
        .steps
        .first()
        .and_then(|s| s.table.clone())
        .unwrap_or_default();
    assert_eq!(
        table,
        vec![
            vec!["rate".to_owned(), "<none>".to_owned()],
            vec!["5".to_owned(), "10".to_owned()],
        ]
    );
}

#[rstest]
fn parsing_is_idempotent(shopping_dir: TempDir) {
    let path = shopping_dir.path().join("shopping.feature");
    assert_eq!(parse(&path), parse(&path));
}

#[test]
fn missing_files_are_read_errors() {
    let dir = TempDir::new().unwrap_or_else(|err| panic!("temp dir: {err}"));
    let result = GherkinDocuments.parse(&dir.path().join("absent.feature"));
    assert!(matches!(result, Err(DocumentError::Read { .. })));
}

#[test]
fn invalid_gherkin_is_a_parse_error() {
    let dir = TempDir::new().unwrap_or_else(|err| panic!("temp dir: {err}"));
    let path = dir.path().join("broken.feature");
    fs::write(&path, "This is not Gherkin at all\n")
        .unwrap_or_else(|err| panic!("write feature: {err}"));
    let result = GherkinDocuments.parse(&path);
    assert!(matches!(result, Err(DocumentError::Parse { .. })));
}
