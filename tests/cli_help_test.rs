// Binary-level behavior: guidance screen, plan output, argument validation.

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn test_no_subcommand_shows_guidance() {
    let mut cmd = Command::cargo_bin("wheelhouse").unwrap();

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("WHEELHOUSE - Smoke-Test a Built Binary"))
        .stdout(predicate::str::contains("wheelhouse plan"))
        .stdout(predicate::str::contains("wheelhouse run"))
        .stdout(predicate::str::contains("wheelhouse doctor"));
}

#[test]
fn test_plan_marks_windows_setup_skipped_on_linux() {
    let mut cmd = Command::cargo_bin("wheelhouse").unwrap();

    cmd.args([
        "plan",
        "--sha",
        "abc123",
        "--arch",
        "linux-64",
        "--runs-on",
        "ubuntu-latest",
    ])
    .assert()
    .success()
    .stdout(predicate::str::contains("STEP PLAN for linux-64 @ abc123"))
    .stdout(predicate::str::contains(
        "create dev drive — skipped (windows targets only)",
    ))
    .stdout(predicate::str::contains(
        "write summary (powershell) — skipped (windows targets only)",
    ))
    .stdout(predicate::str::contains(
        "run --locked test-common-wheels-ci --pixi-exec",
    ))
    .stdout(predicate::str::contains("chmod a+x"));
}

#[test]
fn test_plan_marks_chmod_skipped_on_windows() {
    let mut cmd = Command::cargo_bin("wheelhouse").unwrap();

    cmd.args([
        "plan",
        "--sha",
        "abc123",
        "--arch",
        "win-64",
        "--runs-on",
        "windows-latest",
    ])
    .assert()
    .success()
    .stdout(predicate::str::contains(
        "make release binaries executable — skipped (non-windows targets only)",
    ))
    .stdout(predicate::str::contains("create dev drive — "))
    .stdout(predicate::str::contains("copy workspace to dev drive"))
    .stdout(predicate::str::contains(
        "write summary (bash) — skipped (non-windows targets only)",
    ));
}

#[test]
fn test_plan_lists_steps_that_survive_failure() {
    let mut cmd = Command::cargo_bin("wheelhouse").unwrap();

    cmd.args([
        "plan",
        "--sha",
        "abc123",
        "--arch",
        "linux-64",
        "--runs-on",
        "ubuntu-latest",
    ])
    .assert()
    .success()
    .stdout(predicate::str::contains("Run despite upstream failure:"))
    .stdout(predicate::str::contains("upload test logs"));
}

#[test]
fn test_doctor_reports_environment_checks() {
    // Exit status depends on the host environment, so only the check output
    // is asserted.
    let dir = tempfile::tempdir().unwrap();
    let mut cmd = Command::cargo_bin("wheelhouse").unwrap();

    cmd.current_dir(dir.path())
        .arg("doctor")
        .assert()
        .stdout(predicate::str::contains("WHEELHOUSE DOCTOR"))
        .stdout(predicate::str::contains("git"))
        .stdout(predicate::str::contains("artifact store"));
}

#[test]
fn test_run_requires_all_three_inputs() {
    let mut cmd = Command::cargo_bin("wheelhouse").unwrap();

    cmd.args(["run", "--sha", "abc123"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--arch"));
}

#[test]
fn test_run_rejects_blank_sha() {
    let mut cmd = Command::cargo_bin("wheelhouse").unwrap();

    cmd.args([
        "run",
        "--sha",
        " ",
        "--arch",
        "linux-64",
        "--runs-on",
        "ubuntu-latest",
    ])
    .assert()
    .failure()
    .stderr(predicate::str::contains("commit reference"));
}
