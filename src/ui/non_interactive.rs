//! Non-interactive UI for CI/headless environments.

use super::{DownloadProgress, OutputMode, ProgressHandle, UserInterface};

/// UI implementation for non-interactive mode.
///
/// Prints plain lines with no colors and no progress bars; each download
/// produces a start line and a finish line.
pub struct NonInteractiveUI {
    mode: OutputMode,
}

impl NonInteractiveUI {
    /// Create a new non-interactive UI.
    pub fn new(mode: OutputMode) -> Self {
        Self { mode }
    }
}

impl UserInterface for NonInteractiveUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        if self.mode.shows_status() {
            println!("{}", msg);
        }
    }

    fn success(&mut self, msg: &str) {
        if self.mode.shows_status() {
            println!("✓ {}", msg);
        }
    }

    fn warning(&mut self, msg: &str) {
        if self.mode.shows_status() {
            eprintln!("⚠ {}", msg);
        }
    }

    fn error(&mut self, msg: &str) {
        eprintln!("✗ {}", msg);
    }

    fn show_header(&mut self, title: &str) {
        if self.mode.shows_status() {
            println!("{}", title);
        }
    }

    fn start_download(&mut self, label: &str) -> Box<dyn ProgressHandle> {
        if self.mode.shows_status() {
            println!("{}", label);
        }
        Box::new(LineProgress {
            inner: DownloadProgress::hidden(),
            show: self.mode.shows_status(),
        })
    }
}

/// Progress that only prints the final outcome.
struct LineProgress {
    inner: DownloadProgress,
    show: bool,
}

impl ProgressHandle for LineProgress {
    fn set_length(&mut self, len: u64) {
        self.inner.set_length(len);
    }

    fn advance(&mut self, bytes: u64) {
        self.inner.advance(bytes);
    }

    fn finish_success(&mut self, msg: &str) {
        if self.show {
            println!("✓ {}", msg);
        }
    }

    fn finish_error(&mut self, msg: &str) {
        eprintln!("✗ {}", msg);
    }
}
