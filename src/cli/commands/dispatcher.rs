//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for turning parsed arguments into a command

use std::path::{Path, PathBuf};

use crate::cli::args::Cli;
use crate::error::Result;
use crate::ui::UserInterface;

use super::update::UpdateCommand;

/// Trait for command implementations.
pub trait Command {
    /// Execute the command.
    ///
    /// # Arguments
    ///
    /// * `ui` - User interface for displaying output
    ///
    /// # Returns
    ///
    /// A [`CommandResult`] indicating success/failure and exit code.
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }
}

/// Dispatches parsed CLI arguments to the update command.
pub struct CommandDispatcher {
    working_dir: PathBuf,
}

impl CommandDispatcher {
    /// Create a new dispatcher; relative cache paths resolve against `working_dir`.
    pub fn new(working_dir: PathBuf) -> Self {
        Self { working_dir }
    }

    /// Get the working directory.
    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }

    /// Build and execute the command for `cli`.
    pub fn dispatch(&self, cli: &Cli, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let cmd = UpdateCommand::from_cli(&self.working_dir, cli);
        cmd.execute(ui)
    }
}
