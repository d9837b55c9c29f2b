// End-to-end invocation behavior through the real binary.

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn test_dry_run_walks_the_plan_without_side_effects() {
    let workspace = tempfile::tempdir().unwrap();

    let mut cmd = Command::cargo_bin("wheelhouse").unwrap();
    cmd.current_dir(workspace.path())
        .args([
            "run",
            "--sha",
            "abc123",
            "--arch",
            "linux-64",
            "--runs-on",
            "ubuntu-latest",
            "--dry-run",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("WHEELHOUSE RUN (DRY RUN)"))
        .stdout(predicate::str::contains("would run: git checkout --detach abc123"))
        .stdout(predicate::str::contains(
            "run --locked test-common-wheels-ci --pixi-exec",
        ))
        .stdout(predicate::str::contains("PASS"));

    // Nothing was created in the workspace.
    assert!(!workspace.path().join("release").exists());
    assert!(!workspace.path().join(".wheelhouse").exists());
}

#[test]
fn test_setup_failure_fails_the_run_but_reports() {
    // An empty directory is not a clone, so the checkout step fails and the
    // invocation short-circuits to the publication steps.
    let workspace = tempfile::tempdir().unwrap();
    let workspace_arg = workspace.path().to_string_lossy().to_string();

    let mut cmd = Command::cargo_bin("wheelhouse").unwrap();
    cmd.current_dir(workspace.path())
        .args([
            "run",
            "--sha",
            "abc123",
            "--arch",
            "linux-64",
            "--runs-on",
            "ubuntu-latest",
            "--workspace",
            workspace_arg.as_str(),
        ])
        .assert()
        .failure()
        .stdout(predicate::str::contains("FAIL — step 'checkout'"))
        .stdout(predicate::str::contains("skipped (upstream failure)"));
}
