use crate::actions::artifacts::{logs_artifact_name, release_artifact_name, ArtifactStore};
use crate::actions::summary::SummaryShell;
use crate::actions::{checkout, dev_drive, permissions, summary, wheel_test, ActionError};
use crate::config::WheelhouseConfig;
use crate::external::CommandExecutor;
use crate::fs::FileSystemOperations;
use crate::invocation::bindings::EnvBindings;
use crate::invocation::inputs::InvocationInputs;
use crate::invocation::report::{
    InvocationOutcome, InvocationReport, StepDisposition, StepRecord,
};
use crate::invocation::step::{step_plan, GuardDecision, StepKind};
use crate::observability::{step_metrics, OperationTimer};
use crate::telemetry;
use chrono::Utc;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{error, info, warn, Instrument};
use uuid::Uuid;

/// Executes the fixed step plan for one invocation.
///
/// The overall result is an explicit accumulator initialized to pass and
/// downgraded only by required (non-always) steps; always-gated steps run
/// regardless and their failures are recorded but never change the result.
pub struct Sequencer {
    executor: Arc<dyn CommandExecutor>,
    fs: Arc<dyn FileSystemOperations>,
    config: WheelhouseConfig,
    dry_run: bool,
}

impl Sequencer {
    pub fn new(
        executor: Arc<dyn CommandExecutor>,
        fs: Arc<dyn FileSystemOperations>,
        config: WheelhouseConfig,
    ) -> Self {
        Self {
            executor,
            fs,
            config,
            dry_run: false,
        }
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// The artifact store location; relative paths anchor at the workspace
    /// so concurrent invocations with separate workspaces stay isolated.
    pub fn store_for(&self, workspace: &Path) -> ArtifactStore {
        let configured = PathBuf::from(&self.config.artifact.store_dir);
        let root = if configured.is_absolute() {
            configured
        } else {
            workspace.join(configured)
        };
        ArtifactStore::new(root)
    }

    pub async fn execute(&self, inputs: &InvocationInputs, workspace: &Path) -> InvocationReport {
        let correlation_id = telemetry::generate_correlation_id();
        let span = telemetry::create_invocation_span(&inputs.sha, &inputs.arch, &correlation_id);
        self.execute_inner(inputs, workspace, correlation_id)
            .instrument(span)
            .await
    }

    async fn execute_inner(
        &self,
        inputs: &InvocationInputs,
        workspace: &Path,
        correlation_id: String,
    ) -> InvocationReport {
        let started_at = Utc::now();
        let bindings = EnvBindings::derive(workspace, &self.config.run);
        let windows_target = inputs.is_windows_target();
        let mut records: Vec<StepRecord> = Vec::new();
        let mut failure: Option<(String, String)> = None;

        info!(
            sha = %inputs.sha,
            arch = %inputs.arch,
            runs_on = %inputs.runs_on,
            windows = windows_target,
            dry_run = self.dry_run,
            "Starting invocation"
        );

        for step in step_plan() {
            let decision = step.evaluate(windows_target, failure.is_none());
            match decision {
                GuardDecision::SkippedPlatform => {
                    step_metrics().record_skip();
                    info!(step = step.name, "Skipped (platform condition)");
                    records.push(StepRecord {
                        name: step.name.to_string(),
                        kind: step.kind,
                        disposition: StepDisposition::SkippedPlatform,
                        duration_ms: 0,
                        detail: None,
                    });
                }
                GuardDecision::SkippedUpstreamFailure => {
                    step_metrics().record_skip();
                    info!(step = step.name, "Skipped (upstream failure)");
                    records.push(StepRecord {
                        name: step.name.to_string(),
                        kind: step.kind,
                        disposition: StepDisposition::SkippedUpstreamFailure,
                        duration_ms: 0,
                        detail: None,
                    });
                }
                GuardDecision::Run => {
                    if self.dry_run {
                        let detail = self.describe_step(step.kind, inputs, &bindings);
                        info!(step = step.name, detail = %detail, "Dry run");
                        records.push(StepRecord {
                            name: step.name.to_string(),
                            kind: step.kind,
                            disposition: StepDisposition::DryRun,
                            duration_ms: 0,
                            detail: Some(detail),
                        });
                        continue;
                    }

                    step_metrics().record_run();
                    let timer = OperationTimer::new(step.name);
                    let result = self.dispatch(step.kind, inputs, &bindings).await;
                    let duration_ms = timer.finish().as_millis() as u64;

                    match result {
                        Ok(detail) => {
                            info!(step = step.name, "Step succeeded");
                            records.push(StepRecord {
                                name: step.name.to_string(),
                                kind: step.kind,
                                disposition: StepDisposition::Succeeded,
                                duration_ms,
                                detail: Some(detail),
                            });
                        }
                        Err(err) => {
                            step_metrics().record_failure();
                            let fatal = !step.runs_despite_failure;
                            if fatal {
                                error!(step = step.name, error = %err, "Required step failed");
                                failure = Some((step.name.to_string(), err.to_string()));
                            } else {
                                warn!(step = step.name, error = %err, "Reporting step failed (result unchanged)");
                            }
                            records.push(StepRecord {
                                name: step.name.to_string(),
                                kind: step.kind,
                                disposition: StepDisposition::Failed {
                                    fatal,
                                    error: err.to_string(),
                                },
                                duration_ms,
                                detail: None,
                            });
                        }
                    }
                }
            }
        }

        let outcome = match failure {
            None => InvocationOutcome::Pass,
            Some((failed_step, error)) => InvocationOutcome::Fail { failed_step, error },
        };

        match &outcome {
            InvocationOutcome::Pass => info!("Invocation passed"),
            InvocationOutcome::Fail { failed_step, .. } => {
                error!(failed_step = %failed_step, "Invocation failed")
            }
        }

        InvocationReport {
            run_id: Uuid::new_v4().to_string(),
            correlation_id,
            inputs: inputs.clone(),
            started_at,
            finished_at: Utc::now(),
            steps: records,
            outcome,
        }
    }

    async fn dispatch(
        &self,
        kind: StepKind,
        inputs: &InvocationInputs,
        bindings: &EnvBindings,
    ) -> Result<String, ActionError> {
        match kind {
            StepKind::Checkout => {
                checkout::materialize_source(
                    self.executor.as_ref(),
                    &bindings.workspace_root,
                    &inputs.sha,
                )
                .await
            }
            StepKind::ProvisionDevDrive => {
                dev_drive::provision_dev_drive(
                    self.executor.as_ref(),
                    &bindings.workspace_root,
                    &self.config.platform,
                )
                .await
            }
            StepKind::MirrorWorkspace => {
                dev_drive::mirror_workspace(
                    self.fs.as_ref(),
                    &bindings.workspace_root,
                    &self.config.platform,
                )
                .await
            }
            StepKind::FetchRelease => {
                let store = self.store_for(&bindings.workspace_root);
                let name = release_artifact_name(
                    &self.config.artifact.binary_prefix,
                    &inputs.arch,
                    &inputs.sha,
                );
                store
                    .fetch(self.fs.as_ref(), &name, &bindings.release_dir)
                    .await
            }
            StepKind::NormalizePermissions => {
                permissions::normalize_executable(self.fs.as_ref(), &bindings.release_dir).await
            }
            StepKind::RunWheelTests => {
                wheel_test::run_wheel_tests(self.executor.as_ref(), bindings, &self.config.run)
                    .await
            }
            StepKind::PublishSummaryPosix => {
                let sink = summary::resolve_sink(&bindings.workspace_root, &self.config.summary);
                summary::publish_summary(self.fs.as_ref(), bindings, &sink, SummaryShell::Posix)
                    .await
            }
            StepKind::PublishSummaryWindows => {
                let sink = summary::resolve_sink(&bindings.workspace_root, &self.config.summary);
                summary::publish_summary(
                    self.fs.as_ref(),
                    bindings,
                    &sink,
                    SummaryShell::PowerShell,
                )
                .await
            }
            StepKind::PublishLogs => {
                let store = self.store_for(&bindings.workspace_root);
                let name =
                    logs_artifact_name(&self.config.artifact.logs_prefix, &inputs.arch);
                store
                    .publish(self.fs.as_ref(), &name, &bindings.logs_dir, true)
                    .await
            }
        }
    }

    /// Human-readable description of what a step would do, for `plan` and
    /// `--dry-run` output.
    pub fn describe_step(
        &self,
        kind: StepKind,
        inputs: &InvocationInputs,
        bindings: &EnvBindings,
    ) -> String {
        match kind {
            StepKind::Checkout => format!(
                "git checkout --detach {} in {}",
                inputs.sha,
                bindings.workspace_root.display()
            ),
            StepKind::ProvisionDevDrive => format!(
                "{} -File {}",
                self.config.platform.powershell, self.config.platform.dev_drive_script
            ),
            StepKind::MirrorWorkspace => format!(
                "copy {} -> {}",
                bindings.workspace_root.display(),
                self.config.platform.dev_drive_root
            ),
            StepKind::FetchRelease => format!(
                "retrieve '{}' into {}",
                release_artifact_name(
                    &self.config.artifact.binary_prefix,
                    &inputs.arch,
                    &inputs.sha
                ),
                bindings.release_dir.display()
            ),
            StepKind::NormalizePermissions => {
                format!("chmod a+x {}/*", bindings.release_dir.display())
            }
            StepKind::RunWheelTests => {
                wheel_test::test_command(bindings, &self.config.run).display_line()
            }
            StepKind::PublishSummaryPosix | StepKind::PublishSummaryWindows => {
                let sink = summary::resolve_sink(&bindings.workspace_root, &self.config.summary);
                format!(
                    "append {} to {}",
                    bindings.summary_file.display(),
                    sink.display()
                )
            }
            StepKind::PublishLogs => format!(
                "publish {} as '{}'",
                bindings.logs_dir.display(),
                logs_artifact_name(&self.config.artifact.logs_prefix, &inputs.arch)
            ),
        }
    }
}
