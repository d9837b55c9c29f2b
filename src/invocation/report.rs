use crate::fs::FileSystemOperations;
use crate::invocation::inputs::InvocationInputs;
use crate::invocation::step::StepKind;
use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// File name of the JSON report written into the logs directory.
pub const REPORT_FILE_NAME: &str = "run-report.json";

/// What happened to one step of the plan.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum StepDisposition {
    Succeeded,
    Failed { fatal: bool, error: String },
    SkippedPlatform,
    SkippedUpstreamFailure,
    DryRun,
}

#[derive(Debug, Clone, Serialize)]
pub struct StepRecord {
    pub name: String,
    pub kind: StepKind,
    #[serde(flatten)]
    pub disposition: StepDisposition,
    pub duration_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl StepRecord {
    pub fn executed(&self) -> bool {
        matches!(
            self.disposition,
            StepDisposition::Succeeded | StepDisposition::Failed { .. }
        )
    }
}

/// Overall result of the invocation. Initialized to pass, downgraded only by
/// the failure of a required step.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum InvocationOutcome {
    Pass,
    Fail { failed_step: String, error: String },
}

#[derive(Debug, Clone, Serialize)]
pub struct InvocationReport {
    pub run_id: String,
    pub correlation_id: String,
    pub inputs: InvocationInputs,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub steps: Vec<StepRecord>,
    pub outcome: InvocationOutcome,
}

impl InvocationReport {
    pub fn passed(&self) -> bool {
        self.outcome == InvocationOutcome::Pass
    }

    pub fn failed_step(&self) -> Option<&str> {
        match &self.outcome {
            InvocationOutcome::Pass => None,
            InvocationOutcome::Fail { failed_step, .. } => Some(failed_step),
        }
    }

    /// Write the report as pretty JSON into the logs directory so it travels
    /// with the published logs artifact.
    pub async fn persist(&self, fs: &dyn FileSystemOperations, logs_dir: &Path) -> Result<PathBuf> {
        let path = logs_dir.join(REPORT_FILE_NAME);
        fs.create_dir_all(logs_dir).await?;
        let rendered = serde_json::to_vec_pretty(self)?;
        fs.write(&path, &rendered).await?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_report(outcome: InvocationOutcome) -> InvocationReport {
        InvocationReport {
            run_id: "run-1".to_string(),
            correlation_id: "corr-1".to_string(),
            inputs: InvocationInputs::new("abc123", "linux-64", "ubuntu-latest"),
            started_at: Utc::now(),
            finished_at: Utc::now(),
            steps: vec![StepRecord {
                name: "checkout".to_string(),
                kind: StepKind::Checkout,
                disposition: StepDisposition::Succeeded,
                duration_ms: 12,
                detail: None,
            }],
            outcome,
        }
    }

    #[test]
    fn test_pass_and_fail_accessors() {
        assert!(sample_report(InvocationOutcome::Pass).passed());

        let failed = sample_report(InvocationOutcome::Fail {
            failed_step: "test common wheels".to_string(),
            error: "exit status 1".to_string(),
        });
        assert!(!failed.passed());
        assert_eq!(failed.failed_step(), Some("test common wheels"));
    }

    #[test]
    fn test_serializes_step_status_tag() {
        let report = sample_report(InvocationOutcome::Pass);
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["outcome"]["result"], "pass");
        assert_eq!(json["steps"][0]["status"], "succeeded");
        assert_eq!(json["steps"][0]["kind"], "checkout");
    }
}
