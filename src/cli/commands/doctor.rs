use crate::config;
use crate::config::WheelhouseConfig;
use crate::external::{CommandExecutor, CommandSpec, ProcessCommandExecutor};
use anyhow::Result;
use std::path::Path;
use std::process::ExitCode;

/// Preflight the environment an invocation depends on.
pub async fn doctor_command(arch: Option<String>, write_config: bool) -> Result<ExitCode> {
    let config = config::config()?.clone();
    let executor = ProcessCommandExecutor;
    let mut failures = 0u32;

    println!("🩺 WHEELHOUSE DOCTOR");
    println!("====================");
    println!();

    // git is needed by the checkout step.
    match executor.execute(&CommandSpec::new("git").arg("--version")).await {
        Ok(output) if output.success() => {
            println!("  ✅ git available ({})", output.stdout.trim());
        }
        _ => {
            failures += 1;
            println!("  ❌ git not available on PATH");
            println!("     → The checkout step cannot materialize the source tree without it");
        }
    }

    // The workspace must be a clone for checkout to operate on.
    if Path::new(".git").exists() {
        println!("  ✅ workspace is a git repository");
    } else {
        failures += 1;
        println!("  ❌ workspace is not a git repository");
        println!("     → Run from a clone, or pass --workspace to 'wheelhouse run'");
    }

    // The artifact store has to be reachable for retrieval and publication.
    let store_dir = Path::new(&config.artifact.store_dir);
    if store_dir.exists() {
        println!("  ✅ artifact store present at {}", store_dir.display());
    } else {
        match std::fs::create_dir_all(store_dir) {
            Ok(()) => println!("  ✅ artifact store created at {}", store_dir.display()),
            Err(e) => {
                failures += 1;
                println!(
                    "  ❌ artifact store {} is not writable: {}",
                    store_dir.display(),
                    e
                );
            }
        }
    }

    // PowerShell only matters when the next run targets the Windows branch.
    let windows_target = arch
        .as_deref()
        .map(|label| {
            let label = label.to_ascii_lowercase();
            label.contains("windows") || label == "win" || label.starts_with("win-")
        })
        .unwrap_or(false);
    if windows_target {
        match executor
            .execute(&CommandSpec::new(config.platform.powershell.as_str()).arg("-Version"))
            .await
        {
            Ok(output) if output.success() => {
                println!("  ✅ {} available", config.platform.powershell);
            }
            _ => {
                failures += 1;
                println!(
                    "  ❌ {} not available — dev drive provisioning will fail",
                    config.platform.powershell
                );
            }
        }
    } else {
        println!("  ⏭️  powershell check skipped (no windows target)");
    }

    if write_config {
        if Path::new("wheelhouse.toml").exists() {
            println!("  ⏭️  wheelhouse.toml already exists, not overwriting");
        } else {
            WheelhouseConfig::default().save_to_file("wheelhouse.toml")?;
            println!("  ✅ wrote starter wheelhouse.toml");
        }
    }

    println!();
    if failures == 0 {
        println!("✅ Environment looks ready");
        Ok(ExitCode::SUCCESS)
    } else {
        println!("❌ {failures} check(s) failed");
        Ok(ExitCode::from(1))
    }
}
