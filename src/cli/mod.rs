use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod commands;

#[derive(Parser)]
#[command(name = "wheelhouse")]
#[command(about = "Post-build smoke runs of a package-manager binary against common wheels")]
#[command(long_about = "Wheelhouse drives a previously built pixi binary through its own \
                       common-wheels test task: it checks out the matching commit, retrieves \
                       the release artifact, runs the tests, and publishes logs and a summary \
                       regardless of the result. Start with 'wheelhouse plan' to see what a \
                       run would do.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Execute the full step sequence for one architecture/runner pair
    Run {
        /// Commit reference the binary was built from
        #[arg(long, help = "Commit SHA naming both the source tree and the release artifact")]
        sha: String,
        /// Target architecture label
        #[arg(long, help = "Architecture label, e.g. linux-64 or win-64")]
        arch: String,
        /// Runner OS label
        #[arg(long = "runs-on", help = "Runner label, e.g. ubuntu-latest or windows-latest")]
        runs_on: String,
        /// Workspace root holding the source clone
        #[arg(long, default_value = ".", help = "Directory the invocation operates in")]
        workspace: PathBuf,
        /// Show what each step would do without making changes
        #[arg(long, help = "Walk the plan without side effects")]
        dry_run: bool,
    },
    /// Print the step plan and each step's guard disposition for the inputs
    Plan {
        /// Commit reference the binary was built from
        #[arg(long, help = "Commit SHA naming both the source tree and the release artifact")]
        sha: String,
        /// Target architecture label
        #[arg(long, help = "Architecture label, e.g. linux-64 or win-64")]
        arch: String,
        /// Runner OS label
        #[arg(long = "runs-on", help = "Runner label, e.g. ubuntu-latest or windows-latest")]
        runs_on: String,
        /// Workspace root the paths are resolved against
        #[arg(long, default_value = ".", help = "Directory the invocation would operate in")]
        workspace: PathBuf,
    },
    /// Check that the environment can support an invocation
    Doctor {
        /// Architecture label the next run targets, for platform-specific checks
        #[arg(long, help = "Include checks for this architecture's platform branch")]
        arch: Option<String>,
        /// Write a wheelhouse.toml populated with the defaults
        #[arg(long, help = "Write a starter wheelhouse.toml if none exists")]
        write_config: bool,
    },
}
