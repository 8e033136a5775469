//! Download progress display.

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

use super::{CacheTheme, ProgressHandle};

const BAR_TEMPLATE: &str =
    "{spinner:.magenta} {msg} [{bar:30.magenta/dim}] {bytes}/{total_bytes} ({bytes_per_sec}, {eta})";
const SPINNER_TEMPLATE: &str = "{spinner:.magenta} {msg} {bytes} ({bytes_per_sec})";

/// An indicatif-backed progress bar for one download.
///
/// Starts as a byte-counting spinner and switches to a bar once the total
/// length is known.
pub struct DownloadProgress {
    bar: ProgressBar,
    theme: CacheTheme,
}

impl DownloadProgress {
    /// Create a visible progress display.
    pub fn new(label: &str, theme: CacheTheme) -> Self {
        let bar = ProgressBar::new_spinner();
        bar.set_style(style(SPINNER_TEMPLATE));
        bar.set_message(label.to_string());
        bar.enable_steady_tick(Duration::from_millis(100));
        Self { bar, theme }
    }

    /// Create a display that draws nothing.
    pub fn hidden() -> Self {
        Self {
            bar: ProgressBar::hidden(),
            theme: CacheTheme::plain(),
        }
    }

    fn finish_with(&mut self, line: String) {
        self.bar.set_style(style("{msg}"));
        self.bar.finish_with_message(line);
    }
}

fn style(template: &str) -> ProgressStyle {
    ProgressStyle::with_template(template)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▓░")
        .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ ")
}

impl ProgressHandle for DownloadProgress {
    fn set_length(&mut self, len: u64) {
        self.bar.set_length(len);
        self.bar.set_style(style(BAR_TEMPLATE));
    }

    fn advance(&mut self, bytes: u64) {
        self.bar.inc(bytes);
    }

    fn finish_success(&mut self, msg: &str) {
        let line = self.theme.format_success(msg);
        self.finish_with(line);
    }

    fn finish_error(&mut self, msg: &str) {
        let line = self.theme.format_error(msg);
        self.finish_with(line);
    }
}

/// Format a duration for display.
pub fn format_duration(d: Duration) -> String {
    let secs = d.as_secs_f64();
    if secs < 1.0 {
        format!("{}ms", d.as_millis())
    } else if secs < 60.0 {
        format!("{:.1}s", secs)
    } else {
        let mins = secs / 60.0;
        format!("{:.1}m", mins)
    }
}
