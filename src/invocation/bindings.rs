use crate::config::RunConfig;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Subdirectory of the workspace the release artifact is unpacked into.
pub const RELEASE_SUBDIR: &str = "release";
/// Where the wheel-test task writes its per-package logs.
pub const LOGS_SUBDIR: &str = "tests/wheel_tests/.logs";
/// Markdown summary the wheel-test task produces.
pub const SUMMARY_SUBPATH: &str = "tests/wheel_tests/.summary.md";

/// Paths and flags derived once from the workspace root at invocation start
/// and held constant through all steps.
#[derive(Debug, Clone, Serialize)]
pub struct EnvBindings {
    pub workspace_root: PathBuf,
    pub release_dir: PathBuf,
    pub logs_dir: PathBuf,
    pub summary_file: PathBuf,
    /// Value bound to PYTHONIOENCODING for the test subprocess
    pub io_encoding: String,
    /// Option string handed to the wheel-test tooling via WHEEL_TEST_OPTS
    pub tool_opts: String,
}

impl EnvBindings {
    pub fn derive(workspace_root: &Path, run: &RunConfig) -> Self {
        Self {
            workspace_root: workspace_root.to_path_buf(),
            release_dir: workspace_root.join(RELEASE_SUBDIR),
            logs_dir: workspace_root.join(LOGS_SUBDIR),
            summary_file: workspace_root.join(SUMMARY_SUBPATH),
            io_encoding: run.io_encoding.clone(),
            tool_opts: run.tool_opts.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WheelhouseConfig;

    #[test]
    fn test_derivation_is_deterministic() {
        let run = WheelhouseConfig::default().run;
        let a = EnvBindings::derive(Path::new("/work"), &run);
        let b = EnvBindings::derive(Path::new("/work"), &run);
        assert_eq!(a.release_dir, b.release_dir);
        assert_eq!(a.release_dir, PathBuf::from("/work/release"));
        assert_eq!(a.logs_dir, PathBuf::from("/work/tests/wheel_tests/.logs"));
        assert_eq!(
            a.summary_file,
            PathBuf::from("/work/tests/wheel_tests/.summary.md")
        );
        assert_eq!(a.io_encoding, "utf-8");
    }
}
