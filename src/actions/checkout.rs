//! Source tree materialization at a fixed commit, delegated to the git CLI.

use crate::actions::ActionError;
use crate::external::{CommandExecutor, CommandSpec};
use std::path::Path;
use tracing::{debug, warn};

/// Bring the workspace to the requested commit.
///
/// The workspace must already be a clone; a fetch failure is tolerated (the
/// commit may be local already) but the checkout itself must succeed.
pub async fn materialize_source(
    executor: &dyn CommandExecutor,
    workspace: &Path,
    sha: &str,
) -> Result<String, ActionError> {
    let fetch = CommandSpec::new("git")
        .args(["fetch", "--quiet", "origin", sha])
        .current_dir(workspace);
    match executor.execute(&fetch).await {
        Ok(output) if output.success() => {
            debug!(sha, "Fetched commit from origin");
        }
        Ok(output) => {
            warn!(sha, stderr = %output.stderr.trim(), "Fetch failed, trying local objects");
        }
        Err(source) => {
            return Err(ActionError::Launch {
                program: "git".to_string(),
                source,
            });
        }
    }

    let checkout = CommandSpec::new("git")
        .args(["checkout", "--detach", sha])
        .current_dir(workspace);
    let output = executor
        .execute(&checkout)
        .await
        .map_err(|source| ActionError::Launch {
            program: "git".to_string(),
            source,
        })?;

    if !output.success() {
        return Err(ActionError::CommandFailed {
            program: "git".to_string(),
            status: output.status_code,
            stderr: output.stderr.trim().to_string(),
        });
    }

    Ok(format!("checked out {sha}"))
}
