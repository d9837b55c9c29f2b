//! File system operations abstraction for testing
//!
//! This module provides a trait-based abstraction over the file system
//! operations the sequencer needs (artifact transfer, workspace mirroring,
//! summary publication), mockable in tests via the `mockall` crate.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

#[cfg(test)]
use mockall::{automock, predicate::*};

/// Trait for file system operations that can be mocked in tests
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait FileSystemOperations: Send + Sync {
    /// Create a directory and all its parent directories
    async fn create_dir_all(&self, path: &Path) -> Result<()>;

    /// Write data to a file, creating the file if it doesn't exist
    async fn write(&self, path: &Path, contents: &[u8]) -> Result<()>;

    /// Append data to a file, creating the file if it doesn't exist
    async fn append(&self, path: &Path, contents: &[u8]) -> Result<()>;

    /// Read a file to a string
    async fn read_to_string(&self, path: &Path) -> Result<String>;

    /// Check if a path exists
    fn exists(&self, path: &Path) -> bool;

    /// Recursively copy a directory tree.
    ///
    /// `include_hidden` controls whether dot-prefixed entries are carried
    /// over; publication of test logs requires them.
    async fn copy_tree(&self, src: &Path, dst: &Path, include_hidden: bool) -> Result<u64>;

    /// List the regular files directly inside a directory
    async fn list_files(&self, dir: &Path) -> Result<Vec<PathBuf>>;

    /// Mark a file executable. No-op on platforms without a unix
    /// permission model.
    async fn make_executable(&self, path: &Path) -> Result<()>;
}

/// Standard implementation that uses actual file system operations
pub struct StandardFileSystem;

#[async_trait::async_trait]
impl FileSystemOperations for StandardFileSystem {
    async fn create_dir_all(&self, path: &Path) -> Result<()> {
        tokio::fs::create_dir_all(path)
            .await
            .with_context(|| format!("failed to create directory {}", path.display()))
    }

    async fn write(&self, path: &Path, contents: &[u8]) -> Result<()> {
        tokio::fs::write(path, contents)
            .await
            .with_context(|| format!("failed to write {}", path.display()))
    }

    async fn append(&self, path: &Path, contents: &[u8]) -> Result<()> {
        use tokio::io::AsyncWriteExt;

        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .await
            .with_context(|| format!("failed to open {} for append", path.display()))?;
        file.write_all(contents)
            .await
            .with_context(|| format!("failed to append to {}", path.display()))?;
        file.flush().await?;
        Ok(())
    }

    async fn read_to_string(&self, path: &Path) -> Result<String> {
        tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("failed to read {}", path.display()))
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    async fn copy_tree(&self, src: &Path, dst: &Path, include_hidden: bool) -> Result<u64> {
        let src = src.to_path_buf();
        let dst = dst.to_path_buf();
        tokio::task::spawn_blocking(move || copy_tree_blocking(&src, &dst, include_hidden))
            .await
            .context("copy task panicked")?
    }

    async fn list_files(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        let mut entries = tokio::fs::read_dir(dir)
            .await
            .with_context(|| format!("failed to read directory {}", dir.display()))?;
        while let Some(entry) = entries.next_entry().await? {
            if entry.file_type().await?.is_file() {
                files.push(entry.path());
            }
        }
        files.sort();
        Ok(files)
    }

    #[cfg(unix)]
    async fn make_executable(&self, path: &Path) -> Result<()> {
        use std::os::unix::fs::PermissionsExt;

        let metadata = tokio::fs::metadata(path)
            .await
            .with_context(|| format!("failed to stat {}", path.display()))?;
        let mut permissions = metadata.permissions();
        // chmod a+x
        permissions.set_mode(permissions.mode() | 0o111);
        tokio::fs::set_permissions(path, permissions)
            .await
            .with_context(|| format!("failed to set permissions on {}", path.display()))
    }

    #[cfg(not(unix))]
    async fn make_executable(&self, _path: &Path) -> Result<()> {
        Ok(())
    }
}

fn copy_tree_blocking(src: &Path, dst: &Path, include_hidden: bool) -> Result<u64> {
    let mut copied = 0u64;
    std::fs::create_dir_all(dst)
        .with_context(|| format!("failed to create directory {}", dst.display()))?;
    for entry in std::fs::read_dir(src)
        .with_context(|| format!("failed to read directory {}", src.display()))?
    {
        let entry = entry?;
        let name = entry.file_name();
        if !include_hidden && name.to_string_lossy().starts_with('.') {
            continue;
        }
        let target = dst.join(&name);
        if entry.file_type()?.is_dir() {
            copied += copy_tree_blocking(&entry.path(), &target, include_hidden)?;
        } else {
            std::fs::copy(entry.path(), &target)
                .with_context(|| format!("failed to copy {}", entry.path().display()))?;
            copied += 1;
        }
    }
    Ok(copied)
}
