use crate::config;
use crate::external::ProcessCommandExecutor;
use crate::fs::StandardFileSystem;
use crate::invocation::{step_plan, EnvBindings, GuardDecision, InvocationInputs, Sequencer};
use anyhow::{anyhow, Result};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

/// Show every step with its guard disposition for the given inputs, assuming
/// all upstream steps succeed.
pub async fn plan_command(
    sha: String,
    arch: String,
    runs_on: String,
    workspace: PathBuf,
) -> Result<ExitCode> {
    let inputs = InvocationInputs::new(sha, arch, runs_on);
    inputs.validate().map_err(|e| anyhow!(e))?;
    let config = config::config()?.clone();

    let sequencer = Sequencer::new(
        Arc::new(ProcessCommandExecutor),
        Arc::new(StandardFileSystem),
        config.clone(),
    );
    let bindings = EnvBindings::derive(&workspace, &config.run);
    let windows_target = inputs.is_windows_target();

    println!(
        "📋 STEP PLAN for {} @ {} (runs-on: {})",
        inputs.arch, inputs.sha, inputs.runs_on
    );
    println!("─────────────────────────────────────");

    let mut always_steps = Vec::new();
    for (index, step) in step_plan().iter().enumerate() {
        let position = index + 1;
        match step.evaluate(windows_target, true) {
            GuardDecision::Run => {
                let detail = sequencer.describe_step(step.kind, &inputs, &bindings);
                println!("  {position}. ▶️  {} — {}", step.name, detail);
            }
            GuardDecision::SkippedPlatform => {
                let reason = if windows_target {
                    "non-windows targets only"
                } else {
                    "windows targets only"
                };
                println!("  {position}. ⏭️  {} — skipped ({reason})", step.name);
            }
            // Unreachable while assuming success, kept for completeness.
            GuardDecision::SkippedUpstreamFailure => {
                println!("  {position}. ⏭️  {} — skipped", step.name);
            }
        }
        if step.runs_despite_failure {
            always_steps.push(step.name);
        }
    }

    println!();
    println!(
        "ℹ️  Run despite upstream failure: {}",
        always_steps.join(", ")
    );
    println!("▶️  Execute with: wheelhouse run --sha <sha> --arch <arch> --runs-on <label>");
    Ok(ExitCode::SUCCESS)
}
