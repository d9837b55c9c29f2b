//! External process integration
//!
//! Every collaborator this tool drives (git, PowerShell, the tested binary)
//! is reached through the `CommandExecutor` seam defined here.

pub mod command;

pub use command::{CommandError, CommandExecutor, CommandOutput, CommandSpec, ProcessCommandExecutor};
