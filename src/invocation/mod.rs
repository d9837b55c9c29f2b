//! The Workflow Invocation Sequencer.
//!
//! One invocation = one architecture/runner pair driven through the fixed
//! step plan: checkout, platform setup, artifact retrieval, permission
//! normalization, wheel-test execution, then summary and log publication.

pub mod bindings;
pub mod inputs;
pub mod report;
pub mod sequencer;
pub mod step;

pub use bindings::EnvBindings;
pub use inputs::InvocationInputs;
pub use report::{InvocationOutcome, InvocationReport, StepDisposition, StepRecord};
pub use sequencer::Sequencer;
pub use step::{step_plan, Condition, GuardDecision, Step, StepKind};
