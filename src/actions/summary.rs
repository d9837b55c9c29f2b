//! Summary publication: append the generated summary to the run-summary
//! sink, whatever shell family the runner would have used for it.

use crate::actions::ActionError;
use crate::config::SummaryConfig;
use crate::fs::FileSystemOperations;
use crate::invocation::EnvBindings;
use std::path::{Path, PathBuf};
use tracing::info;

/// Sink variable populated by CI engines; honored when present so the tool
/// composes with a real step-summary mechanism.
pub const STEP_SUMMARY_VAR: &str = "GITHUB_STEP_SUMMARY";

/// The two mutually exclusive platform branches. In a shell pipeline they
/// differ only in append syntax; here they differ only in reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryShell {
    Posix,
    PowerShell,
}

impl SummaryShell {
    pub fn label(&self) -> &'static str {
        match self {
            SummaryShell::Posix => "bash",
            SummaryShell::PowerShell => "powershell",
        }
    }
}

/// Resolve where summary text accumulates for this run.
pub fn resolve_sink(workspace: &Path, summary: &SummaryConfig) -> PathBuf {
    match std::env::var(STEP_SUMMARY_VAR) {
        Ok(path) if !path.trim().is_empty() => PathBuf::from(path),
        _ => workspace.join(&summary.sink_file),
    }
}

/// Append the summary file's contents to the sink. Appends, never
/// truncates: multiple invocations may share one sink.
pub async fn publish_summary(
    fs: &dyn FileSystemOperations,
    bindings: &EnvBindings,
    sink: &Path,
    shell: SummaryShell,
) -> Result<String, ActionError> {
    if !fs.exists(&bindings.summary_file) {
        return Err(ActionError::SummaryMissing {
            path: bindings.summary_file.clone(),
        });
    }

    let contents = fs.read_to_string(&bindings.summary_file).await?;
    if let Some(parent) = sink.parent() {
        fs.create_dir_all(parent).await?;
    }
    fs.append(sink, contents.as_bytes()).await?;

    info!(
        shell = shell.label(),
        sink = %sink.display(),
        bytes = contents.len(),
        "Summary appended"
    );
    Ok(format!(
        "appended {} bytes to {} ({})",
        contents.len(),
        sink.display(),
        shell.label()
    ))
}
