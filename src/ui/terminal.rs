//! Interactive terminal UI.

use console::Term;
use std::io::Write;

use super::{
    should_use_colors, CacheTheme, DownloadProgress, NonInteractiveUI, OutputMode, ProgressHandle,
    UserInterface,
};

/// Interactive terminal UI implementation.
pub struct TerminalUI {
    term: Term,
    err_term: Term,
    theme: CacheTheme,
    mode: OutputMode,
}

impl TerminalUI {
    /// Create a new terminal UI.
    pub fn new(mode: OutputMode) -> Self {
        let theme = if should_use_colors() {
            CacheTheme::new()
        } else {
            CacheTheme::plain()
        };

        Self {
            term: Term::stdout(),
            err_term: Term::stderr(),
            theme,
            mode,
        }
    }
}

impl UserInterface for TerminalUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        if self.mode.shows_status() {
            writeln!(self.term, "{}", msg).ok();
        }
    }

    fn success(&mut self, msg: &str) {
        if self.mode.shows_status() {
            writeln!(self.term, "{}", self.theme.format_success(msg)).ok();
        }
    }

    fn warning(&mut self, msg: &str) {
        if self.mode.shows_status() {
            writeln!(self.err_term, "{}", self.theme.format_warning(msg)).ok();
        }
    }

    fn error(&mut self, msg: &str) {
        writeln!(self.err_term, "{}", self.theme.format_error(msg)).ok();
    }

    fn show_header(&mut self, title: &str) {
        if self.mode.shows_status() {
            writeln!(self.term, "{}", self.theme.format_header(title)).ok();
        }
    }

    fn start_download(&mut self, label: &str) -> Box<dyn ProgressHandle> {
        if self.mode.shows_progress() {
            Box::new(DownloadProgress::new(label, self.theme.clone()))
        } else {
            if self.mode.shows_status() {
                writeln!(self.term, "{}", label).ok();
            }
            Box::new(DownloadProgress::hidden())
        }
    }
}

/// Check if running under a CI system.
pub fn is_ci() -> bool {
    std::env::var("CI").is_ok()
        || std::env::var("GITHUB_ACTIONS").is_ok()
        || std::env::var("GITLAB_CI").is_ok()
        || std::env::var("CIRCLECI").is_ok()
        || std::env::var("TRAVIS").is_ok()
        || std::env::var("JENKINS_URL").is_ok()
}

/// Create the UI for the current environment.
///
/// A terminal UI with progress bars is used only when `interactive` is set
/// and stdout is a TTY; otherwise plain line output.
pub fn create_ui(interactive: bool, mode: OutputMode) -> Box<dyn UserInterface> {
    if interactive && Term::stdout().is_term() {
        Box::new(TerminalUI::new(mode))
    } else {
        Box::new(NonInteractiveUI::new(mode))
    }
}
