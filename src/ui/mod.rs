//! User interface components.
//!
//! This module provides:
//! - [`UserInterface`] trait for UI abstraction
//! - [`TerminalUI`] for interactive terminal usage
//! - [`NonInteractiveUI`] for CI/headless environments
//! - [`MockUI`] for capturing output in tests
//! - Download progress bars
//!
//! # Example
//!
//! ```
//! use runtime_cache::ui::{create_ui, OutputMode};
//!
//! // Use non-interactive mode for testability
//! let mut ui = create_ui(false, OutputMode::Quiet);
//! ui.show_header(".NET Core Runtime 3.1.0");
//! ui.success("Runtime cache is up to date");
//! ```

pub mod mock;
pub mod non_interactive;
pub mod output;
pub mod progress;
pub mod terminal;
pub mod theme;

pub use mock::{DownloadRecord, MockProgress, MockUI};
pub use non_interactive::NonInteractiveUI;
pub use output::OutputMode;
pub use progress::{format_duration, DownloadProgress};
pub use terminal::{create_ui, is_ci, TerminalUI};
pub use theme::{should_use_colors, CacheTheme};

/// Trait for user interface interactions.
///
/// This trait allows mocking the UI in tests.
pub trait UserInterface {
    /// Get the current output mode.
    fn output_mode(&self) -> OutputMode;

    /// Display a message to the user.
    fn message(&mut self, msg: &str);

    /// Display a success message.
    fn success(&mut self, msg: &str);

    /// Display a warning message.
    fn warning(&mut self, msg: &str);

    /// Display an error message.
    fn error(&mut self, msg: &str);

    /// Show a header/banner.
    fn show_header(&mut self, title: &str);

    /// Start progress reporting for a download.
    fn start_download(&mut self, label: &str) -> Box<dyn ProgressHandle>;
}

/// Handle for reporting download progress.
pub trait ProgressHandle {
    /// Set the total number of bytes, once known.
    fn set_length(&mut self, len: u64);

    /// Record `bytes` more bytes received.
    fn advance(&mut self, bytes: u64);

    /// Mark the download as finished.
    fn finish_success(&mut self, msg: &str);

    /// Mark the download as failed.
    fn finish_error(&mut self, msg: &str);
}
