// crates/large-code-gen-cli/tests/cli.rs
// ============================================================================
// Module: CLI Binary Tests
// Description: Exercises the large-code-gen binary end to end.
// Purpose: Confirm stdout/stderr and exit status contracts for each outcome.
// Dependencies: large-code-gen, large-code-gen-cli binary
// ============================================================================

//! ## Overview
//! Runs the compiled binary and checks that successful runs print only the
//! artifact, validation failures print only diagnostics, and `--check`
//! detects drift against the checked-in fixture.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

use std::path::PathBuf;
use std::process::Command;
use std::process::Output;

use large_code_gen::FixtureGenerator;

// ============================================================================
// SECTION: Helpers
// ============================================================================

fn generator_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_large-code-gen"))
}

fn checked_in_fixture() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../large-code-gen/testdata/large_code_3.c")
}

fn run(args: &[&str]) -> Output {
    run_with_env(args, &[])
}

fn run_with_env(args: &[&str], env: &[(&str, &str)]) -> Output {
    let mut command = Command::new(generator_bin());
    command.args(args).env_remove("LARGE_CODE_GEN_LANG").env_remove("LARGE_CODE_GEN_LOG");
    for (key, value) in env {
        command.env(key, value);
    }
    command.output().expect("run large-code-gen")
}

// ============================================================================
// SECTION: Generation
// ============================================================================

#[test]
fn prints_artifact_for_valid_count() {
    let output = run(&["3"]);
    assert!(output.status.success());
    assert!(
        output.stderr.is_empty(),
        "unexpected stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let expected = FixtureGenerator::from_args(["3"]).expect("valid count").render();
    assert_eq!(String::from_utf8(output.stdout).expect("utf-8 artifact"), expected);
}

#[test]
fn repeated_runs_are_byte_identical() {
    let first = run(&["500"]);
    let second = run(&["500"]);
    assert!(first.status.success());
    assert_eq!(first.stdout, second.stdout);
}

#[test]
fn ignores_arguments_after_count() {
    let output = run(&["1", "extra"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("unsigned func1(unsigned x) {\n  return x + 1;\n}\n"));
    assert!(!stdout.contains("func2"));
}

// ============================================================================
// SECTION: Validation
// ============================================================================

#[test]
fn missing_count_prints_usage() {
    let output = run(&[]);
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Usage: large-code-gen num_functions"), "unexpected stderr: {stderr}");
    assert!(!stderr.contains("Parameter must be an integer."));
}

#[test]
fn invalid_counts_print_message_and_usage() {
    for raw in ["0", "-5", "abc"] {
        let output = run(&[raw]);
        assert!(!output.status.success(), "expected failure for {raw}");
        assert!(output.stdout.is_empty(), "unexpected stdout for {raw}");
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains("Parameter must be an integer."), "unexpected stderr: {stderr}");
        assert!(stderr.contains("Usage: large-code-gen num_functions"));
    }
}

#[test]
fn catalan_locale_localizes_diagnostics() {
    let output = run_with_env(&["0"], &[("LARGE_CODE_GEN_LANG", "ca")]);
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("El paràmetre ha de ser un enter."), "unexpected stderr: {stderr}");
    assert!(stderr.contains("traduïda automàticament"));
}

#[test]
fn catalan_locale_keeps_successful_runs_quiet() {
    let output = run_with_env(&["3"], &[("LARGE_CODE_GEN_LANG", "ca")]);
    assert!(output.status.success());
    assert!(
        output.stderr.is_empty(),
        "unexpected stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let expected = FixtureGenerator::from_args(["3"]).expect("valid count").render();
    assert_eq!(String::from_utf8(output.stdout).expect("utf-8 artifact"), expected);
}

#[test]
fn invalid_log_filter_is_reported() {
    let output = run_with_env(&["3"], &[("LARGE_CODE_GEN_LOG", "large_code_gen=loudest")]);
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("LARGE_CODE_GEN_LOG"), "unexpected stderr: {stderr}");
}

#[test]
fn version_flag_prints_version() {
    let output = run(&["--version"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.trim(), format!("large-code-gen {}", env!("CARGO_PKG_VERSION")));
}

// ============================================================================
// SECTION: Drift Check
// ============================================================================

#[test]
fn check_accepts_matching_fixture() {
    let fixture = checked_in_fixture();
    let output = run(&["--check", fixture.to_string_lossy().as_ref(), "3"]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert!(output.stdout.is_empty());
}

#[test]
fn check_reports_drift() {
    let fixture = checked_in_fixture();
    let output = run(&["--check", fixture.to_string_lossy().as_ref(), "4"]);
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Fixture drift detected"), "unexpected stderr: {stderr}");
    assert!(stderr.contains("large-code-gen 4"));
}
