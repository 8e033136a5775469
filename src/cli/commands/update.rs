//! Update command implementation.
//!
//! `runtime-cache [PLATFORM]...` reconciles the cache with the manifest
//! version and downloads any requested platform that is missing.

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::cache::CacheRoot;
use crate::cli::args::Cli;
use crate::config::{load_manifest, RuntimeManifest};
use crate::error::Result;
use crate::fetch::HttpFetcher;
use crate::platform::parse_platforms;
use crate::runner::{RunOptions, RunReport, UpdateRunner};
use crate::ui::{format_duration, UserInterface};

use super::dispatcher::{Command, CommandResult};

/// The update command implementation.
#[derive(Debug, Clone)]
pub struct UpdateCommand {
    working_dir: PathBuf,
    platforms: Vec<String>,
    cache_root: Option<PathBuf>,
    manifest: Option<PathBuf>,
    timeout: Option<u64>,
    keep_going: bool,
}

impl UpdateCommand {
    /// Create an update command for the given platform tokens.
    pub fn new(working_dir: &Path, platforms: Vec<String>) -> Self {
        Self {
            working_dir: working_dir.to_path_buf(),
            platforms,
            cache_root: None,
            manifest: None,
            timeout: None,
            keep_going: false,
        }
    }

    /// Create an update command from parsed arguments.
    pub fn from_cli(working_dir: &Path, cli: &Cli) -> Self {
        Self {
            working_dir: working_dir.to_path_buf(),
            platforms: cli.platforms.clone(),
            cache_root: cli.cache_root.clone(),
            manifest: cli.manifest.clone(),
            timeout: cli.timeout,
            keep_going: cli.keep_going,
        }
    }

    /// Use `path` as the cache root instead of the manifest's.
    pub fn with_cache_root(mut self, path: impl Into<PathBuf>) -> Self {
        self.cache_root = Some(path.into());
        self
    }

    /// Load the manifest from `path` instead of the built-in one.
    pub fn with_manifest(mut self, path: impl Into<PathBuf>) -> Self {
        self.manifest = Some(path.into());
        self
    }

    /// Resolve the cache root: explicit override first, then the manifest,
    /// relative paths against the working directory.
    fn cache_root(&self, manifest: &RuntimeManifest) -> CacheRoot {
        let path = self
            .cache_root
            .clone()
            .unwrap_or_else(|| manifest.cache_dir.clone());
        if path.is_absolute() {
            CacheRoot::new(path)
        } else {
            CacheRoot::new(self.working_dir.join(path))
        }
    }

    fn report(&self, report: &RunReport, cache: &CacheRoot, ui: &mut dyn UserInterface) {
        for failed in report.failures() {
            if let Err(e) = &failed.outcome {
                ui.error(&format!(
                    "{} failed during {}: {}",
                    failed.platform,
                    e.stage().label(),
                    e
                ));
            }
        }
        for platform in &report.not_attempted {
            ui.warning(&format!("Skipped {} after an earlier failure", platform));
        }

        if !report.success() {
            return;
        }

        if report.platforms.is_empty() {
            ui.success(&format!("Cache at {} is up to date", cache.path().display()));
        } else {
            ui.success(&format!(
                "{} platform(s) ready ({} downloaded, {} cached) in {}",
                report.platforms.len(),
                report.fetched(),
                report.cached(),
                format_duration(report.duration)
            ));
        }
    }
}

impl Command for UpdateCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let platforms = parse_platforms(self.platforms.as_slice())?;
        let manifest = load_manifest(self.manifest.as_deref())?;
        let cache = self.cache_root(&manifest);

        ui.show_header(&format!("{} {}", manifest.name, manifest.version));
        if ui.output_mode().shows_details() {
            ui.message(&format!("Cache: {}", cache.path().display()));
            let installed = cache.installed_platforms();
            if !installed.is_empty() {
                let names: Vec<_> = installed.iter().map(|p| p.as_str()).collect();
                ui.message(&format!("Installed: {}", names.join(", ")));
            }
        }

        let http = HttpFetcher::with_timeout(self.timeout.map(Duration::from_secs))?;
        let options = RunOptions {
            keep_going: self.keep_going,
        };
        let report = UpdateRunner::new(&manifest, &http).run(&cache, &platforms, &options, ui)?;

        self.report(&report, &cache, ui);

        if report.success() {
            Ok(CommandResult::success())
        } else {
            Ok(CommandResult::failure(1))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archive::extract::fixtures;
    use crate::error::RuntimeCacheError;
    use crate::ui::{MockUI, OutputMode};
    use httpmock::prelude::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_manifest(temp: &TempDir, server: &MockServer) -> PathBuf {
        let path = temp.path().join("runtime.yml");
        let yaml = format!(
            "name: Test Runtime\nversion: \"1.0.0\"\ncache_dir: deps/rt\nplatforms:\n  linux:\n    url: {}\n  windows:\n    url: {}\n",
            server.url("/rt-linux.tar.gz"),
            server.url("/rt-win.zip"),
        );
        fs::write(&path, yaml).unwrap();
        path
    }

    #[test]
    fn downloads_into_manifest_cache_dir() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/rt-linux.tar.gz");
            then.status(200)
                .body(fixtures::tar_gz(&[("dotnet", "linux", 0o755)]));
        });
        let temp = TempDir::new().unwrap();
        let manifest = write_manifest(&temp, &server);

        let cmd = UpdateCommand::new(temp.path(), vec!["linux".into()]).with_manifest(&manifest);
        let mut ui = MockUI::new();
        let result = cmd.execute(&mut ui).unwrap();

        assert!(result.success);
        let root = temp.path().join("deps/rt");
        assert_eq!(fs::read_to_string(root.join("VERSION")).unwrap(), "1.0.0");
        assert!(root.join("linux/dotnet").is_file());
        assert_eq!(ui.headers(), ["Test Runtime 1.0.0"]);
        assert!(ui.has_output("1 downloaded"));
    }

    #[test]
    fn cache_root_override_wins() {
        let server = MockServer::start();
        let temp = TempDir::new().unwrap();
        let manifest = write_manifest(&temp, &server);
        let root = temp.path().join("elsewhere");

        let cmd = UpdateCommand::new(temp.path(), Vec::new())
            .with_manifest(&manifest)
            .with_cache_root(&root);
        let mut ui = MockUI::new();
        let result = cmd.execute(&mut ui).unwrap();

        assert!(result.success);
        assert!(root.join("VERSION").is_file());
        assert!(!temp.path().join("deps").exists());
    }

    #[test]
    fn unknown_platform_is_configuration_error() {
        let temp = TempDir::new().unwrap();
        let cmd = UpdateCommand::new(temp.path(), vec!["beos".into()])
            .with_cache_root(temp.path().join("cache"));
        let mut ui = MockUI::new();

        let err = cmd.execute(&mut ui).unwrap_err();

        assert!(matches!(err, RuntimeCacheError::UnknownPlatform { .. }));
        assert_eq!(err.exit_code(), 2);
        assert!(!temp.path().join("cache").exists());
    }

    #[test]
    fn failed_download_reports_platform_and_stage() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/rt-win.zip");
            then.status(404);
        });
        let temp = TempDir::new().unwrap();
        let manifest = write_manifest(&temp, &server);

        let cmd = UpdateCommand::new(temp.path(), vec!["windows".into(), "linux".into()])
            .with_manifest(&manifest);
        let mut ui = MockUI::new();
        let result = cmd.execute(&mut ui).unwrap();

        assert_eq!(result.exit_code, 1);
        assert!(ui.errors()[0].contains("windows failed during download"));
        assert!(ui.has_output("Skipped linux"));
    }

    #[test]
    fn verbose_mode_lists_installed_platforms() {
        let server = MockServer::start();
        let temp = TempDir::new().unwrap();
        let manifest = write_manifest(&temp, &server);
        let root = temp.path().join("deps/rt");
        fs::create_dir_all(root.join("windows")).unwrap();
        fs::write(root.join("VERSION"), "1.0.0").unwrap();

        let cmd = UpdateCommand::new(temp.path(), vec!["windows".into()]).with_manifest(&manifest);
        let mut ui = MockUI::with_mode(OutputMode::Verbose);
        let result = cmd.execute(&mut ui).unwrap();

        assert!(result.success);
        assert!(ui.has_output("Installed: windows"));
        assert!(ui.has_output("1 cached"));
    }
}
