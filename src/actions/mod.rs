//! The external collaborators each step delegates to.
//!
//! Nothing here implements a build system or test runner; every action
//! sequences a subprocess or a filesystem transfer and reports the result.

pub mod artifacts;
pub mod checkout;
pub mod dev_drive;
pub mod permissions;
pub mod summary;

use crate::external::CommandError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ActionError {
    #[error("failed to launch {program}: {source}")]
    Launch {
        program: String,
        #[source]
        source: CommandError,
    },
    #[error("{program} exited with status {status}: {stderr}")]
    CommandFailed {
        program: String,
        status: i32,
        stderr: String,
    },
    #[error("wheel tests failed with exit status {status}")]
    TestsFailed { status: i32 },
    #[error("artifact '{name}' not found in store {store}")]
    ArtifactMissing { name: String, store: PathBuf },
    #[error("summary file {path} does not exist")]
    SummaryMissing { path: PathBuf },
    #[error(transparent)]
    Io(#[from] anyhow::Error),
}

impl ActionError {
    /// The wheel-test step carries the run's authoritative exit status; every
    /// other failure is a setup or publication problem.
    pub fn test_exit_status(&self) -> Option<i32> {
        match self {
            ActionError::TestsFailed { status } => Some(*status),
            _ => None,
        }
    }
}
