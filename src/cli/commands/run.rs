use crate::config;
use crate::external::ProcessCommandExecutor;
use crate::fs::StandardFileSystem;
use crate::invocation::{
    EnvBindings, InvocationInputs, InvocationOutcome, Sequencer, StepDisposition,
};
use crate::observability::step_metrics;
use anyhow::{anyhow, Result};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

pub async fn run_command(
    sha: String,
    arch: String,
    runs_on: String,
    workspace: PathBuf,
    dry_run: bool,
) -> Result<ExitCode> {
    let inputs = InvocationInputs::new(sha, arch, runs_on);
    inputs.validate().map_err(|e| anyhow!(e))?;
    let config = config::config()?.clone();

    if dry_run {
        println!("🧪 WHEELHOUSE RUN (DRY RUN)");
    } else {
        println!("🧪 WHEELHOUSE RUN");
    }
    println!("==================");
    println!("  📌 Commit:  {}", inputs.sha);
    println!("  🏗️  Arch:    {}", inputs.arch);
    println!("  🖥️  Runner:  {}", inputs.runs_on);
    println!("  📂 Workspace: {}", workspace.display());
    println!();

    let sequencer = Sequencer::new(
        Arc::new(ProcessCommandExecutor),
        Arc::new(StandardFileSystem),
        config.clone(),
    )
    .with_dry_run(dry_run);

    let ceiling = Duration::from_secs(config.run.timeout_minutes * 60);
    let report = match tokio::time::timeout(ceiling, sequencer.execute(&inputs, &workspace)).await
    {
        Ok(report) => report,
        Err(_) => {
            println!(
                "❌ Invocation exceeded the {} minute ceiling and was aborted",
                config.run.timeout_minutes
            );
            return Ok(ExitCode::from(1));
        }
    };

    for record in &report.steps {
        match &record.disposition {
            StepDisposition::Succeeded => {
                println!("  ✅ {} ({} ms)", record.name, record.duration_ms);
            }
            StepDisposition::Failed { fatal: true, error } => {
                println!("  ❌ {} — {}", record.name, error);
            }
            StepDisposition::Failed {
                fatal: false,
                error,
            } => {
                println!("  ⚠️  {} — {} (result unchanged)", record.name, error);
            }
            StepDisposition::SkippedPlatform => {
                println!("  ⏭️  {} — skipped (platform)", record.name);
            }
            StepDisposition::SkippedUpstreamFailure => {
                println!("  ⏭️  {} — skipped (upstream failure)", record.name);
            }
            StepDisposition::DryRun => {
                let detail = record.detail.as_deref().unwrap_or("");
                println!("  🔍 {} — would run: {}", record.name, detail);
            }
        }
    }
    println!();

    if !dry_run {
        let bindings = EnvBindings::derive(&workspace, &config.run);
        match report.persist(&StandardFileSystem, &bindings.logs_dir).await {
            Ok(path) => println!("📄 Report written to {}", path.display()),
            Err(e) => println!("⚠️  Could not write run report: {e:#}"),
        }
    }
    step_metrics().log_stats();

    match &report.outcome {
        InvocationOutcome::Pass => {
            println!("✅ PASS — wheel run completed for {}", inputs.arch);
            Ok(ExitCode::SUCCESS)
        }
        InvocationOutcome::Fail { failed_step, error } => {
            println!("❌ FAIL — step '{failed_step}': {error}");
            println!("   📦 Logs and summary were still published for inspection");
            Ok(ExitCode::from(1))
        }
    }
}
