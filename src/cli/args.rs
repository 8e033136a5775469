//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::Parser;
use std::path::PathBuf;

/// Keep a versioned runtime cached locally for the platforms you build for.
#[derive(Debug, Parser)]
#[command(name = "runtime-cache")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Platforms to make available (windows, linux, mac)
    #[arg(value_name = "PLATFORM")]
    pub platforms: Vec<String>,

    /// Cache directory (overrides the manifest's cache_dir)
    #[arg(long, env = "RUNTIME_CACHE_ROOT", value_name = "DIR")]
    pub cache_root: Option<PathBuf>,

    /// Runtime manifest to use instead of the built-in one
    #[arg(short, long, env = "RUNTIME_CACHE_MANIFEST", value_name = "FILE")]
    pub manifest: Option<PathBuf>,

    /// Abort a download after this many seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Continue with remaining platforms after a failed download
    #[arg(long)]
    pub keep_going: bool,

    /// Show verbose output
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Minimal output
    #[arg(short, long)]
    pub quiet: bool,

    /// Print errors only
    #[arg(short, long, conflicts_with_all = ["verbose", "quiet"])]
    pub silent: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}
