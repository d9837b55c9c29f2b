use serde::Serialize;

/// The three caller-supplied values that parameterize one invocation.
///
/// Immutable for the lifetime of the run; every guard decision and artifact
/// name is a pure function of these plus configuration.
#[derive(Debug, Clone, Serialize)]
pub struct InvocationInputs {
    /// Commit reference the source tree is materialized at
    pub sha: String,
    /// Target architecture label, e.g. `linux-64`, `win-64`,
    /// `x86_64-pc-windows-msvc`
    pub arch: String,
    /// Runner OS label, e.g. `ubuntu-latest`, `windows-latest`
    pub runs_on: String,
}

impl InvocationInputs {
    pub fn new(sha: impl Into<String>, arch: impl Into<String>, runs_on: impl Into<String>) -> Self {
        Self {
            sha: sha.into(),
            arch: arch.into(),
            runs_on: runs_on.into(),
        }
    }

    /// All three fields are required and a blank value is always caller error.
    pub fn validate(&self) -> Result<(), String> {
        if self.sha.trim().is_empty() {
            return Err("commit reference must not be empty".to_string());
        }
        if self.arch.trim().is_empty() {
            return Err("architecture label must not be empty".to_string());
        }
        if self.runs_on.trim().is_empty() {
            return Err("runner label must not be empty".to_string());
        }
        Ok(())
    }

    /// Platform predicate gating the Windows-only and non-Windows-only steps.
    ///
    /// Matches both target-triple style labels (`x86_64-pc-windows-msvc`)
    /// and platform-tag style labels (`win-64`), plus the runner label, so
    /// either naming convention selects the Windows branch.
    pub fn is_windows_target(&self) -> bool {
        label_indicates_windows(&self.arch) || label_indicates_windows(&self.runs_on)
    }
}

fn label_indicates_windows(label: &str) -> bool {
    let label = label.to_ascii_lowercase();
    label.contains("windows") || label == "win" || label.starts_with("win-")
}
