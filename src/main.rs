use anyhow::Result;
use clap::Parser;
use std::process::ExitCode;

use wheelhouse::cli::commands::{doctor, plan, run};
use wheelhouse::cli::{Cli, Commands};

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let config = wheelhouse::config::config()?;
    wheelhouse::telemetry::init_telemetry(&config.observability)?;

    let code = match cli.command {
        // Default behavior: no subcommand - explain how to run a smoke test
        None => {
            show_how_to_run();
            ExitCode::SUCCESS
        }
        Some(Commands::Run {
            sha,
            arch,
            runs_on,
            workspace,
            dry_run,
        }) => tokio::runtime::Runtime::new()?.block_on(async {
            run::run_command(sha, arch, runs_on, workspace, dry_run).await
        })?,
        Some(Commands::Plan {
            sha,
            arch,
            runs_on,
            workspace,
        }) => tokio::runtime::Runtime::new()?
            .block_on(async { plan::plan_command(sha, arch, runs_on, workspace).await })?,
        Some(Commands::Doctor { arch, write_config }) => tokio::runtime::Runtime::new()?
            .block_on(async { doctor::doctor_command(arch, write_config).await })?,
    };

    wheelhouse::telemetry::shutdown_telemetry();
    Ok(code)
}

fn show_how_to_run() {
    println!("🧪 WHEELHOUSE - Smoke-Test a Built Binary");
    println!("=========================================");
    println!();
    println!("Wheelhouse replays the post-build pipeline locally: checkout,");
    println!("artifact retrieval, the common-wheels test run, then summary and");
    println!("log publication (which happen even when the tests fail).");
    println!();
    println!("📊 Quick start:");
    println!("   → Preview a run:  wheelhouse plan --sha <sha> --arch linux-64 --runs-on ubuntu-latest");
    println!("   → Execute:        wheelhouse run --sha <sha> --arch linux-64 --runs-on ubuntu-latest");
    println!("   → Check setup:    wheelhouse doctor");
    println!();
    println!("EXAMPLE WORKFLOW:");
    println!("   1. Build publishes 'pixi-<arch>-<sha>' into the artifact store");
    println!("   2. wheelhouse run retrieves it and drives the wheel tests");
    println!("   3. Logs land in the store as 'wheel-tests-logs-<arch>'");
}
