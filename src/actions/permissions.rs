//! Permission normalization for the retrieved release binaries.
//!
//! Artifact transfer does not preserve the execute bit, so every file in the
//! release directory is marked executable before the test step runs. The
//! concept has no Windows counterpart; the step is platform-gated away there.

use crate::actions::ActionError;
use crate::fs::FileSystemOperations;
use std::path::Path;
use tracing::debug;

pub async fn normalize_executable(
    fs: &dyn FileSystemOperations,
    release_dir: &Path,
) -> Result<String, ActionError> {
    let files = fs.list_files(release_dir).await?;
    for file in &files {
        fs.make_executable(file).await?;
        debug!(file = %file.display(), "Marked executable");
    }
    Ok(format!(
        "marked {} files executable in {}",
        files.len(),
        release_dir.display()
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::{MockFileSystemOperations, StandardFileSystem};
    use std::path::PathBuf;

    #[tokio::test]
    async fn test_every_listed_file_is_marked() {
        let mut mock = MockFileSystemOperations::new();
        mock.expect_list_files()
            .withf(|dir| dir == Path::new("/release"))
            .returning(|_| {
                Ok(vec![
                    PathBuf::from("/release/pixi"),
                    PathBuf::from("/release/pixi.sha256"),
                ])
            });
        mock.expect_make_executable().times(2).returning(|_| Ok(()));

        let detail = normalize_executable(&mock, Path::new("/release"))
            .await
            .unwrap();
        assert!(detail.starts_with("marked 2 files executable"));
    }

    #[tokio::test]
    async fn test_missing_release_dir_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result =
            normalize_executable(&StandardFileSystem, &dir.path().join("release")).await;
        assert!(result.is_err());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_every_release_file_becomes_executable() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("pixi"), "elf").unwrap();
        std::fs::write(dir.path().join("pixi.sha256"), "digest").unwrap();

        let detail = normalize_executable(&StandardFileSystem, dir.path())
            .await
            .unwrap();

        assert!(detail.starts_with("marked 2 files executable"));
        for name in ["pixi", "pixi.sha256"] {
            let mode = std::fs::metadata(dir.path().join(name))
                .unwrap()
                .permissions()
                .mode();
            assert_eq!(mode & 0o111, 0o111, "{name}");
        }
    }
}
