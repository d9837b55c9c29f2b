// Wheelhouse Library - post-build wheel smoke-run orchestration
// This exposes the core components for testing and integration

pub mod actions;
pub mod cli;
pub mod config;
pub mod external;
pub mod fs;
pub mod invocation;
pub mod observability;
pub mod telemetry;

// Re-export key types for easy access
pub use actions::artifacts::{logs_artifact_name, release_artifact_name, ArtifactStore};
pub use actions::ActionError;
pub use config::{config, init_config, WheelhouseConfig};
pub use external::{CommandError, CommandExecutor, CommandOutput, CommandSpec, ProcessCommandExecutor};
pub use fs::{FileSystemOperations, StandardFileSystem};
pub use invocation::{
    step_plan, EnvBindings, GuardDecision, InvocationInputs, InvocationOutcome, InvocationReport,
    Sequencer, Step, StepDisposition, StepKind, StepRecord,
};
pub use observability::{step_metrics, OperationTimer, StepMetrics};
pub use telemetry::{generate_correlation_id, init_telemetry, shutdown_telemetry};
