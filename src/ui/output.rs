//! Output mode.

/// Output verbosity mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Show all output including cache details.
    Verbose,
    /// Show progress and status.
    #[default]
    Normal,
    /// Show status lines only, no progress bars.
    Quiet,
    /// Show nothing except errors.
    Silent,
}

impl OutputMode {
    /// Check if this mode shows detail lines.
    pub fn shows_details(&self) -> bool {
        matches!(self, Self::Verbose)
    }

    /// Check if this mode shows progress bars.
    pub fn shows_progress(&self) -> bool {
        matches!(self, Self::Verbose | Self::Normal)
    }

    /// Check if this mode shows status messages.
    pub fn shows_status(&self) -> bool {
        !matches!(self, Self::Silent)
    }
}
