//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results.

pub mod dispatcher;
pub mod update;

pub use dispatcher::{Command, CommandDispatcher, CommandResult};
pub use update::UpdateCommand;
