//! Library integration tests.

use runtime_cache::platform::Platform;
use runtime_cache::RuntimeCacheError;

#[test]
fn error_types_are_public() {
    let err = RuntimeCacheError::PlatformNotConfigured {
        platform: Platform::Mac,
    };
    assert!(err.to_string().contains("mac"));
    assert!(err.is_configuration());
}

#[test]
fn result_type_alias_is_public() {
    fn test_fn() -> runtime_cache::Result<()> {
        Ok(())
    }
    assert!(test_fn().is_ok());
}

#[test]
fn cli_types_are_public() {
    use clap::Parser;
    use runtime_cache::cli::Cli;

    let cli = Cli::parse_from(["runtime-cache", "--keep-going", "linux", "windows"]);
    assert!(cli.keep_going);
    assert_eq!(cli.platforms, vec!["linux", "windows"]);
}

#[test]
fn builtin_manifest_pins_dotnet_runtime() {
    use runtime_cache::archive::ArchiveFormat;
    use runtime_cache::config::builtin_manifest;
    use std::path::Path;

    let manifest = builtin_manifest().unwrap();
    assert_eq!(manifest.name, ".NET Core Runtime");
    assert_eq!(manifest.version, "3.1.0");
    assert_eq!(manifest.cache_dir, Path::new("Dependencies/dotnet"));

    let linux = manifest.resolve(Platform::Linux).unwrap();
    assert_eq!(linux.format, ArchiveFormat::TarGz);
    let windows = manifest.resolve(Platform::Windows).unwrap();
    assert_eq!(windows.format, ArchiveFormat::Zip);
    let mac = manifest.resolve(Platform::Mac).unwrap();
    assert_eq!(mac.format, ArchiveFormat::TarGz);
}

#[test]
fn platform_tokens_round_trip_through_display() {
    for platform in Platform::ALL {
        let parsed: Platform = platform.to_string().parse().unwrap();
        assert_eq!(parsed, platform);
    }
}
