//! Artifact transfer against a local, name-keyed store.
//!
//! The store lifecycle belongs to the upstream build and downstream
//! consumers; this module only performs one read (the release binary) and
//! one write (the test logs) per invocation.

use crate::actions::ActionError;
use crate::fs::FileSystemOperations;
use std::path::{Path, PathBuf};
use tracing::info;

/// Name under which the upstream build published the binary.
pub fn release_artifact_name(prefix: &str, arch: &str, sha: &str) -> String {
    format!("{prefix}-{arch}-{sha}")
}

/// Name under which this invocation publishes its logs. Commit-independent:
/// a re-run for the same architecture replaces the previous logs.
pub fn logs_artifact_name(prefix: &str, arch: &str) -> String {
    format!("{prefix}-{arch}")
}

#[derive(Debug, Clone)]
pub struct ArtifactStore {
    root: PathBuf,
}

impl ArtifactStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn entry(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    /// Copy a named artifact's contents into `dest`. A missing entry is a
    /// fatal setup failure.
    pub async fn fetch(
        &self,
        fs: &dyn FileSystemOperations,
        name: &str,
        dest: &Path,
    ) -> Result<String, ActionError> {
        let source = self.entry(name);
        if !fs.exists(&source) {
            return Err(ActionError::ArtifactMissing {
                name: name.to_string(),
                store: self.root.clone(),
            });
        }
        let copied = fs.copy_tree(&source, dest, true).await?;
        info!(artifact = name, files = copied, dest = %dest.display(), "Artifact retrieved");
        Ok(format!("retrieved '{name}' ({copied} files)"))
    }

    /// Publish a directory under a name, dot-prefixed files included.
    pub async fn publish(
        &self,
        fs: &dyn FileSystemOperations,
        name: &str,
        source: &Path,
        include_hidden: bool,
    ) -> Result<String, ActionError> {
        let target = self.entry(name);
        let copied = fs.copy_tree(source, &target, include_hidden).await?;
        info!(artifact = name, files = copied, "Artifact published");
        Ok(format!("published '{name}' ({copied} files)"))
    }
}
