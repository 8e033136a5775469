//! Mock UI implementation for testing.
//!
//! `MockUI` implements the `UserInterface` trait and captures all
//! interactions for later assertion.
//!
//! # Example
//!
//! ```
//! use runtime_cache::ui::{MockUI, UserInterface};
//!
//! let mut ui = MockUI::new();
//! ui.message("Checking cache");
//! ui.success("Done!");
//!
//! assert!(ui.messages().contains(&"Checking cache".to_string()));
//! assert!(ui.successes().contains(&"Done!".to_string()));
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use super::{OutputMode, ProgressHandle, UserInterface};

/// Record of one download shown through the mock.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DownloadRecord {
    /// Label passed to `start_download`.
    pub label: String,
    /// Length reported by the fetcher, if any.
    pub length: Option<u64>,
    /// Bytes reported so far.
    pub received: u64,
    /// Final message, if finished.
    pub finished: Option<Result<String, String>>,
}

/// Mock UI implementation for testing.
#[derive(Debug, Default)]
pub struct MockUI {
    mode: OutputMode,
    messages: Vec<String>,
    successes: Vec<String>,
    warnings: Vec<String>,
    errors: Vec<String>,
    headers: Vec<String>,
    downloads: Vec<Rc<RefCell<DownloadRecord>>>,
}

impl MockUI {
    /// Create a new MockUI with Normal output mode.
    pub fn new() -> Self {
        Self {
            mode: OutputMode::Normal,
            ..Default::default()
        }
    }

    /// Create a new MockUI with a specific output mode.
    pub fn with_mode(mode: OutputMode) -> Self {
        Self {
            mode,
            ..Default::default()
        }
    }

    /// Get all captured messages.
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// Get all captured success messages.
    pub fn successes(&self) -> &[String] {
        &self.successes
    }

    /// Get all captured warning messages.
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Get all captured error messages.
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Get all captured headers.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Snapshot of every download started so far.
    pub fn downloads(&self) -> Vec<DownloadRecord> {
        self.downloads.iter().map(|d| d.borrow().clone()).collect()
    }

    /// Check if any captured output contains the given text.
    pub fn has_output(&self, needle: &str) -> bool {
        self.messages
            .iter()
            .chain(&self.successes)
            .chain(&self.warnings)
            .chain(&self.errors)
            .chain(&self.headers)
            .any(|line| line.contains(needle))
    }
}

impl UserInterface for MockUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        self.messages.push(msg.to_string());
    }

    fn success(&mut self, msg: &str) {
        self.successes.push(msg.to_string());
    }

    fn warning(&mut self, msg: &str) {
        self.warnings.push(msg.to_string());
    }

    fn error(&mut self, msg: &str) {
        self.errors.push(msg.to_string());
    }

    fn show_header(&mut self, title: &str) {
        self.headers.push(title.to_string());
    }

    fn start_download(&mut self, label: &str) -> Box<dyn ProgressHandle> {
        let record = Rc::new(RefCell::new(DownloadRecord {
            label: label.to_string(),
            ..Default::default()
        }));
        self.downloads.push(Rc::clone(&record));
        Box::new(MockProgress { record })
    }
}

/// Progress handle handed out by [`MockUI`].
#[derive(Debug)]
pub struct MockProgress {
    record: Rc<RefCell<DownloadRecord>>,
}

impl ProgressHandle for MockProgress {
    fn set_length(&mut self, len: u64) {
        self.record.borrow_mut().length = Some(len);
    }

    fn advance(&mut self, bytes: u64) {
        self.record.borrow_mut().received += bytes;
    }

    fn finish_success(&mut self, msg: &str) {
        self.record.borrow_mut().finished = Some(Ok(msg.to_string()));
    }

    fn finish_error(&mut self, msg: &str) {
        self.record.borrow_mut().finished = Some(Err(msg.to_string()));
    }
}
