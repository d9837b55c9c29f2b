// Artifact names must be pure functions of their inputs: the producer and
// consumer only agree through the name, so any drift breaks the handoff.

use proptest::prelude::*;
use wheelhouse::{logs_artifact_name, release_artifact_name};

proptest! {
    #[test]
    fn release_names_are_deterministic(
        prefix in "[a-z][a-z0-9]{0,7}",
        arch in "[a-z][a-z0-9-]{0,15}",
        sha in "[0-9a-f]{7,40}",
    ) {
        let first = release_artifact_name(&prefix, &arch, &sha);
        let second = release_artifact_name(&prefix, &arch, &sha);
        prop_assert_eq!(&first, &second);
        let expected_prefix = format!("{prefix}-");
        let expected_suffix = format!("-{sha}");
        prop_assert!(first.starts_with(&expected_prefix));
        prop_assert!(first.ends_with(&expected_suffix));
        prop_assert!(first.contains(&arch));
    }

    #[test]
    fn logs_names_are_commit_independent(
        prefix in "[a-z][a-z0-9-]{0,15}",
        arch in "[a-z][a-z0-9-]{0,15}",
    ) {
        // The logs artifact is keyed by architecture alone, so a re-run at
        // any commit publishes under the same name.
        prop_assert_eq!(
            logs_artifact_name(&prefix, &arch),
            format!("{prefix}-{arch}")
        );
    }

    #[test]
    fn distinct_architectures_never_collide(
        prefix in "[a-z][a-z0-9]{0,7}",
        arch_a in "[a-z][a-z0-9]{0,15}",
        arch_b in "[a-z][a-z0-9]{0,15}",
        sha in "[0-9a-f]{7,40}",
    ) {
        prop_assume!(arch_a != arch_b);
        prop_assert_ne!(
            release_artifact_name(&prefix, &arch_a, &sha),
            release_artifact_name(&prefix, &arch_b, &sha)
        );
    }
}

#[test]
fn pipeline_names_match_the_upstream_contract() {
    assert_eq!(
        release_artifact_name("pixi", "linux-64", "abc123"),
        "pixi-linux-64-abc123"
    );
    assert_eq!(
        logs_artifact_name("wheel-tests-logs", "win-64"),
        "wheel-tests-logs-win-64"
    );
}
