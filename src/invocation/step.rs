//! The fixed step plan and its guard semantics.
//!
//! A step is a tagged action with a platform condition and an explicit
//! runs-despite-failure flag. The plan is an ordered list; steps execute in
//! declared order, never concurrently, never reordered.

use serde::Serialize;

/// Which action a step performs. One variant per external collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StepKind {
    Checkout,
    ProvisionDevDrive,
    MirrorWorkspace,
    FetchRelease,
    NormalizePermissions,
    RunWheelTests,
    PublishSummaryPosix,
    PublishSummaryWindows,
    PublishLogs,
}

/// Platform predicate attached to a step, evaluated against the
/// architecture/runner labels at execution time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    Unconditional,
    WindowsOnly,
    NonWindowsOnly,
}

#[derive(Debug, Clone, Copy)]
pub struct Step {
    pub kind: StepKind,
    pub name: &'static str,
    pub condition: Condition,
    /// `always()` semantics: run even after an upstream required step
    /// failed. A failure in such a step never downgrades the run result.
    pub runs_despite_failure: bool,
}

/// Why a step did or did not execute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GuardDecision {
    Run,
    SkippedPlatform,
    SkippedUpstreamFailure,
}

impl Step {
    const fn new(kind: StepKind, name: &'static str, condition: Condition) -> Self {
        Self {
            kind,
            name,
            condition,
            runs_despite_failure: false,
        }
    }

    const fn always(mut self) -> Self {
        self.runs_despite_failure = true;
        self
    }

    /// A step executes iff its platform condition holds and either every
    /// prior required step succeeded or the step carries the
    /// runs-despite-failure override.
    pub fn evaluate(&self, windows_target: bool, sequence_ok: bool) -> GuardDecision {
        let platform_ok = match self.condition {
            Condition::Unconditional => true,
            Condition::WindowsOnly => windows_target,
            Condition::NonWindowsOnly => !windows_target,
        };
        if !platform_ok {
            return GuardDecision::SkippedPlatform;
        }
        if !sequence_ok && !self.runs_despite_failure {
            return GuardDecision::SkippedUpstreamFailure;
        }
        GuardDecision::Run
    }
}

/// The fixed, ordered plan every invocation executes.
pub fn step_plan() -> Vec<Step> {
    vec![
        Step::new(StepKind::Checkout, "checkout", Condition::Unconditional),
        Step::new(
            StepKind::ProvisionDevDrive,
            "create dev drive",
            Condition::WindowsOnly,
        ),
        Step::new(
            StepKind::MirrorWorkspace,
            "copy workspace to dev drive",
            Condition::WindowsOnly,
        ),
        Step::new(
            StepKind::FetchRelease,
            "download release artifact",
            Condition::Unconditional,
        ),
        Step::new(
            StepKind::NormalizePermissions,
            "make release binaries executable",
            Condition::NonWindowsOnly,
        ),
        Step::new(
            StepKind::RunWheelTests,
            "test common wheels",
            Condition::Unconditional,
        ),
        Step::new(
            StepKind::PublishSummaryPosix,
            "write summary (bash)",
            Condition::NonWindowsOnly,
        )
        .always(),
        Step::new(
            StepKind::PublishSummaryWindows,
            "write summary (powershell)",
            Condition::WindowsOnly,
        )
        .always(),
        Step::new(
            StepKind::PublishLogs,
            "upload test logs",
            Condition::Unconditional,
        )
        .always(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan_step(kind: StepKind) -> Step {
        step_plan()
            .into_iter()
            .find(|s| s.kind == kind)
            .expect("step present in plan")
    }

    #[test]
    fn test_plan_order_is_fixed() {
        let kinds: Vec<StepKind> = step_plan().iter().map(|s| s.kind).collect();
        assert_eq!(
            kinds,
            vec![
                StepKind::Checkout,
                StepKind::ProvisionDevDrive,
                StepKind::MirrorWorkspace,
                StepKind::FetchRelease,
                StepKind::NormalizePermissions,
                StepKind::RunWheelTests,
                StepKind::PublishSummaryPosix,
                StepKind::PublishSummaryWindows,
                StepKind::PublishLogs,
            ]
        );
    }

    #[test]
    fn test_windows_setup_gated_on_platform() {
        let provision = plan_step(StepKind::ProvisionDevDrive);
        assert_eq!(provision.evaluate(true, true), GuardDecision::Run);
        assert_eq!(
            provision.evaluate(false, true),
            GuardDecision::SkippedPlatform
        );

        let chmod = plan_step(StepKind::NormalizePermissions);
        assert_eq!(chmod.evaluate(false, true), GuardDecision::Run);
        assert_eq!(chmod.evaluate(true, true), GuardDecision::SkippedPlatform);
    }

    #[test]
    fn test_required_steps_skip_after_upstream_failure() {
        let tests = plan_step(StepKind::RunWheelTests);
        assert_eq!(
            tests.evaluate(false, false),
            GuardDecision::SkippedUpstreamFailure
        );
    }

    #[test]
    fn test_always_steps_run_despite_upstream_failure() {
        let upload = plan_step(StepKind::PublishLogs);
        assert_eq!(upload.evaluate(false, false), GuardDecision::Run);
        assert_eq!(upload.evaluate(true, false), GuardDecision::Run);

        // The platform condition still applies to always-gated steps: the
        // two summary variants stay mutually exclusive even after failure.
        let posix = plan_step(StepKind::PublishSummaryPosix);
        let windows = plan_step(StepKind::PublishSummaryWindows);
        assert_eq!(posix.evaluate(true, false), GuardDecision::SkippedPlatform);
        assert_eq!(windows.evaluate(true, false), GuardDecision::Run);
        assert_eq!(posix.evaluate(false, false), GuardDecision::Run);
        assert_eq!(
            windows.evaluate(false, false),
            GuardDecision::SkippedPlatform
        );
    }
}
