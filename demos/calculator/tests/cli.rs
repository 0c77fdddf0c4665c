//! End-to-end tests for the calculator binary.

use std::process::Output;
use std::str;

use assert_cmd::Command;
use rstest::rstest;

const ENV_VARS: [&str; 4] = [
    "BDD_RUNNER_LOG_LEVEL",
    "BDD_RUNNER_FORMAT",
    "BDD_RUNNER_FAIL_FAST",
    "BDD_RUNNER_FEATURES_DIR",
];

fn calculator() -> Command {
    let mut cmd = Command::cargo_bin("calculator").unwrap_or_else(|err| panic!("binary: {err}"));
    cmd.current_dir(env!("CARGO_MANIFEST_DIR"));
    for var in ENV_VARS {
        cmd.env_remove(var);
    }
    cmd
}

fn run(cmd: &mut Command) -> (Option<i32>, String) {
    let output: Output = cmd.output().unwrap_or_else(|err| panic!("runs: {err}"));
    let stdout = str::from_utf8(&output.stdout)
        .unwrap_or_else(|err| panic!("utf8: {err}"))
        .to_owned();
    (output.status.code(), stdout)
}

#[test]
fn runs_every_discovered_feature() {
    let (code, stdout) = run(&mut calculator());

    assert_eq!(code, Some(0), "{stdout}");
    assert!(stdout.contains("Feature: Addition"), "{stdout}");
    assert!(stdout.contains("Feature: Division"), "{stdout}");
    assert!(stdout.contains("Feature: Memory"), "{stdout}");
    assert!(
        stdout.contains("[pending] And I take the square root: square roots are not implemented"),
        "{stdout}"
    );
    assert!(
        stdout.ends_with("8 scenarios (7 passed, 0 failed, 1 pending): ok\n"),
        "{stdout}"
    );
}

#[rstest]
#[case("features/arithmetic/addition.feature:6", "adding two numbers (line 6)")]
#[case("features/arithmetic/addition.feature:19", "adding 6 to -4 (line 19)")]
#[case("features/arithmetic/division.feature:10", "dividing by zero (line 10)")]
fn line_selection_runs_one_scenario(#[case] identifier: &str, #[case] heading: &str) {
    let (code, stdout) = run(calculator().arg(identifier));

    assert_eq!(code, Some(0), "{stdout}");
    assert!(stdout.contains(heading), "{stdout}");
    assert!(
        stdout.ends_with("1 scenarios (1 passed, 0 failed, 0 pending): ok\n"),
        "{stdout}"
    );
}

#[test]
fn unmatched_line_warns_and_passes() {
    let (code, stdout) = run(calculator().arg("features/memory.feature:2"));

    assert_eq!(code, Some(0), "{stdout}");
    assert!(
        stdout.contains("warning: no scenario of 'Memory' starts on line 2"),
        "{stdout}"
    );
}

#[test]
fn failing_scenarios_exit_with_one() {
    let (code, stdout) = run(calculator().args(["--features-dir", "features-failing"]));

    assert_eq!(code, Some(1), "{stdout}");
    assert!(stdout.contains("Failures:"), "{stdout}");
    assert!(stdout.contains("expected 5, display shows 4"), "{stdout}");
    assert!(stdout.contains("undefined step"), "{stdout}");
    assert!(
        stdout.ends_with("3 scenarios (1 passed, 2 failed, 0 pending): FAILED\n"),
        "{stdout}"
    );
}

#[rstest]
#[case::flag(&["--format", "json", "features/arithmetic/division.feature"], None)]
#[case::environment(&["features/arithmetic/division.feature"], Some("json"))]
fn json_report_lists_scenarios(#[case] args: &[&str], #[case] env_format: Option<&str>) {
    let mut cmd = calculator();
    cmd.args(args);
    if let Some(format) = env_format {
        cmd.env("BDD_RUNNER_FORMAT", format);
    }
    let (code, stdout) = run(&mut cmd);

    assert_eq!(code, Some(0), "{stdout}");
    let report: serde_json::Value =
        serde_json::from_str(&stdout).unwrap_or_else(|err| panic!("json ({err}): {stdout}"));
    assert_eq!(report.get("success"), Some(&serde_json::Value::Bool(true)));
    let lines: Vec<u64> = report
        .get("scenarios")
        .and_then(serde_json::Value::as_array)
        .map(|all| {
            all.iter()
                .filter_map(|s| s.get("line").and_then(serde_json::Value::as_u64))
                .collect()
        })
        .unwrap_or_default();
    assert_eq!(lines, vec![5, 10]);
}

#[test]
fn fail_fast_skips_later_features() {
    let (code, stdout) = run(calculator().args([
        "--fail-fast",
        "features-failing/addition.feature",
        "features/memory.feature",
    ]));

    assert_eq!(code, Some(1), "{stdout}");
    assert!(!stdout.contains("Feature: Memory"), "{stdout}");
}

#[rstest]
#[case::unknown_file(&["features/missing.feature"], None)]
#[case::malformed_identifier(&["features/memory.feature:"], None)]
#[case::invalid_environment(&[], Some("xml"))]
fn fatal_errors_exit_with_two(#[case] args: &[&str], #[case] env_format: Option<&str>) {
    let mut cmd = calculator();
    cmd.args(args);
    if let Some(format) = env_format {
        cmd.env("BDD_RUNNER_FORMAT", format);
    }
    let (code, stdout) = run(&mut cmd);

    assert_eq!(code, Some(2), "{stdout}");
}
