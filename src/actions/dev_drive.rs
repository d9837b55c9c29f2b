//! Windows-only resource setup: provision a high-performance volume and
//! mirror the workspace onto it.

use crate::actions::ActionError;
use crate::config::PlatformConfig;
use crate::external::{CommandExecutor, CommandSpec};
use crate::fs::FileSystemOperations;
use std::path::Path;
use tracing::info;

/// Run the platform provisioning script through PowerShell.
pub async fn provision_dev_drive(
    executor: &dyn CommandExecutor,
    workspace: &Path,
    platform: &PlatformConfig,
) -> Result<String, ActionError> {
    let script = workspace.join(&platform.dev_drive_script);
    let spec = CommandSpec::new(platform.powershell.as_str())
        .arg("-File")
        .arg(script.to_string_lossy().to_string())
        .current_dir(workspace);

    let output = executor
        .execute(&spec)
        .await
        .map_err(|source| ActionError::Launch {
            program: platform.powershell.clone(),
            source,
        })?;

    if !output.success() {
        return Err(ActionError::CommandFailed {
            program: platform.powershell.clone(),
            status: output.status_code,
            stderr: output.stderr.trim().to_string(),
        });
    }

    info!(script = %script.display(), "Dev drive provisioned");
    Ok(format!("provisioned dev drive via {}", script.display()))
}

/// Duplicate the working directory onto the provisioned volume.
///
/// The destination comes from configuration rather than from parsing the
/// provisioning script's output.
pub async fn mirror_workspace(
    fs: &dyn FileSystemOperations,
    workspace: &Path,
    platform: &PlatformConfig,
) -> Result<String, ActionError> {
    let destination = Path::new(&platform.dev_drive_root);
    let copied = fs.copy_tree(workspace, destination, true).await?;
    info!(files = copied, destination = %destination.display(), "Workspace mirrored");
    Ok(format!(
        "mirrored {} files to {}",
        copied,
        destination.display()
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WheelhouseConfig;
    use crate::external::{CommandError, CommandOutput};
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct RecordingExecutor {
        output: CommandOutput,
        seen: Mutex<Vec<CommandSpec>>,
    }

    #[async_trait]
    impl CommandExecutor for RecordingExecutor {
        async fn execute(&self, spec: &CommandSpec) -> Result<CommandOutput, CommandError> {
            self.seen.lock().unwrap().push(spec.clone());
            Ok(self.output.clone())
        }
    }

    #[tokio::test]
    async fn test_provision_runs_powershell_with_script_path() {
        let executor = RecordingExecutor {
            output: CommandOutput {
                status_code: 0,
                stdout: String::new(),
                stderr: String::new(),
            },
            seen: Mutex::new(Vec::new()),
        };
        let platform = WheelhouseConfig::default().platform;

        provision_dev_drive(&executor, Path::new("/work"), &platform)
            .await
            .unwrap();

        let seen = executor.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].program, "pwsh");
        assert_eq!(seen[0].args[0], "-File");
        assert!(seen[0].args[1].ends_with("setup-dev-drive.ps1"));
    }

    #[tokio::test]
    async fn test_provision_failure_is_fatal() {
        let executor = RecordingExecutor {
            output: CommandOutput {
                status_code: 1,
                stdout: String::new(),
                stderr: "Format-Volume: access denied".to_string(),
            },
            seen: Mutex::new(Vec::new()),
        };
        let platform = WheelhouseConfig::default().platform;

        let err = provision_dev_drive(&executor, Path::new("/work"), &platform)
            .await
            .unwrap_err();
        assert!(matches!(err, ActionError::CommandFailed { status: 1, .. }));
    }

    #[tokio::test]
    async fn test_mirror_copies_everything_including_hidden() {
        let src = tempfile::tempdir().unwrap();
        let dst = tempfile::tempdir().unwrap();
        std::fs::write(src.path().join("pixi.toml"), "[project]").unwrap();
        std::fs::create_dir(src.path().join(".git")).unwrap();
        std::fs::write(src.path().join(".git/HEAD"), "ref").unwrap();

        let mut platform = WheelhouseConfig::default().platform;
        platform.dev_drive_root = dst.path().join("mirror").to_string_lossy().to_string();

        let fs = crate::fs::StandardFileSystem;
        let detail = mirror_workspace(&fs, src.path(), &platform).await.unwrap();

        assert!(detail.starts_with("mirrored 2 files"));
        assert!(dst.path().join("mirror/.git/HEAD").exists());
    }
}
