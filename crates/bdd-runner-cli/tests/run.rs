//! Drives `bdd_runner_cli::run` over feature files on disk.

use std::fs;
use std::path::Path;

use bdd_runner::{FeatureImplementation, Registry, StepDefinitions, StepError};
use bdd_runner_cli::config::{OutputFormat, RunnerConfig};
use rstest::{fixture, rstest};
use tempfile::TempDir;

fn light_steps() -> Box<dyn FeatureImplementation> {
    Box::new(
        StepDefinitions::new(false)
            .given("the light is off", |on, _| {
                *on = false;
                Ok(())
            })
            .when("I flip the switch", |on, _| {
                *on = !*on;
                Ok(())
            })
            .then("the light is {state}", |on, args| {
                let expected = args.capture(0) == Some("on");
                if *on == expected {
                    Ok(())
                } else {
                    Err(StepError::failed("the light disagrees"))
                }
            }),
    )
}

fn registry() -> Registry {
    let mut registry = Registry::new();
    registry
        .register("Lights", light_steps)
        .and_then(|r| r.register("Broken lights", light_steps))
        .unwrap_or_else(|err| panic!("registration: {err}"));
    registry
}

const LIGHTS: &str = "\
Feature: Lights
  Scenario: switching on
    Given the light is off
    When I flip the switch
    Then the light is on
";

const BROKEN: &str = "\
Feature: Broken lights
  Scenario: expecting darkness
    Given the light is off
    When I flip the switch
    Then the light is off
";

#[fixture]
fn features() -> TempDir {
    let dir = TempDir::new().unwrap_or_else(|err| panic!("temp dir: {err}"));
    let nested = dir.path().join("rooms");
    fs::create_dir(&nested).unwrap_or_else(|err| panic!("mkdir: {err}"));
    write(dir.path(), "lights.feature", LIGHTS);
    write(&nested, "broken.feature", BROKEN);
    dir
}

fn write(dir: &Path, name: &str, text: &str) {
    fs::write(dir.join(name), text).unwrap_or_else(|err| panic!("write {name}: {err}"));
}

fn config(dir: &TempDir, format: OutputFormat) -> RunnerConfig {
    RunnerConfig::default().apply_overrides(
        None,
        Some(format),
        None,
        Some(dir.path().to_path_buf()),
    )
}

fn run(config: &RunnerConfig, identifiers: &[String]) -> (bool, String) {
    let mut out = Vec::new();
    let success = bdd_runner_cli::run(config, identifiers, &registry(), &mut out)
        .unwrap_or_else(|err| panic!("run failed: {err:#}"));
    let text = String::from_utf8(out).unwrap_or_else(|err| panic!("utf-8: {err}"));
    (success, text)
}

#[rstest]
fn explicit_identifier_runs_only_that_feature(features: TempDir) {
    let id = features.path().join("lights.feature").display().to_string();

    let (success, output) = run(&config(&features, OutputFormat::Text), &[id]);

    assert!(success, "{output}");
    assert!(output.contains("Feature: Lights"), "{output}");
    assert!(!output.contains("Broken lights"), "{output}");
}

#[rstest]
fn discovers_features_when_no_identifiers_are_given(features: TempDir) {
    let (success, output) = run(&config(&features, OutputFormat::Text), &[]);

    assert!(!success);
    assert!(output.contains("Feature: Lights"), "{output}");
    assert!(output.contains("Feature: Broken lights"), "{output}");
    assert!(output.contains("Failures:"), "{output}");
    assert!(output.ends_with("2 scenarios (1 passed, 1 failed, 0 pending): FAILED\n"), "{output}");
}

#[rstest]
fn fail_fast_stops_after_first_failing_feature(features: TempDir) {
    let config = config(&features, OutputFormat::Text).apply_overrides(None, None, Some(true), None);
    let broken = features
        .path()
        .join("rooms")
        .join("broken.feature")
        .display()
        .to_string();
    let lights = features.path().join("lights.feature").display().to_string();

    let (success, output) = run(&config, &[broken, lights]);

    assert!(!success);
    assert!(!output.contains("Feature: Lights"), "{output}");
}

#[rstest]
fn json_format_emits_a_single_document(features: TempDir) {
    let (success, output) = run(&config(&features, OutputFormat::Json), &[]);

    assert!(!success);
    assert!(output.starts_with("{\"success\":false"), "{output}");
    assert_eq!(output.lines().count(), 1, "{output}");
}

#[rstest]
fn unknown_feature_is_fatal(features: TempDir) {
    write(features.path(), "attic.feature", "Feature: Attic\n");
    let id = features.path().join("attic.feature").display().to_string();
    let mut out = Vec::new();

    let result = bdd_runner_cli::run(
        &config(&features, OutputFormat::Text),
        &[id],
        &registry(),
        &mut out,
    );

    let message = result
        .err()
        .map(|err| format!("{err:#}"))
        .unwrap_or_else(|| panic!("unregistered feature must abort"));
    assert!(message.contains("Attic"), "{message}");
}

#[test]
fn missing_features_directory_is_fatal() {
    let dir = TempDir::new().unwrap_or_else(|err| panic!("temp dir: {err}"));
    let config = RunnerConfig::default().apply_overrides(
        None,
        None,
        None,
        Some(dir.path().join("absent")),
    );
    let mut out = Vec::new();

    assert!(bdd_runner_cli::run(&config, &[], &registry(), &mut out).is_err());
}
