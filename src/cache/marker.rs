//! Version marker file.
//!
//! The marker is a single line holding the version the cache was last
//! reconciled to. It carries no other structure.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

/// File name of the marker inside the cache root.
pub const MARKER_FILE: &str = "VERSION";

/// Read the recorded version from a marker file.
///
/// Returns `Ok(None)` when the file does not exist or its parent is not a
/// directory, which is distinct from an empty recorded version. Surrounding whitespace is trimmed; bytes that
/// are not UTF-8 are replaced, so such a marker never matches a real version.
pub fn read_marker(path: &Path) -> io::Result<Option<String>> {
    match fs::read(path) {
        Ok(bytes) => Ok(Some(String::from_utf8_lossy(&bytes).trim().to_string())),
        Err(e) if matches!(e.kind(), io::ErrorKind::NotFound | io::ErrorKind::NotADirectory) => {
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

/// Write `version` as the marker inside `dir`.
///
/// The content goes to a temporary file in the same directory first and is
/// then renamed over the marker, so readers never see a half-written line.
pub fn write_marker(dir: &Path, version: &str) -> io::Result<()> {
    let mut file = tempfile::Builder::new()
        .prefix(".VERSION")
        .suffix(".tmp")
        .tempfile_in(dir)?;
    file.write_all(version.as_bytes())?;
    file.as_file().sync_all()?;
    file.persist(dir.join(MARKER_FILE)).map_err(|e| e.error)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_marker_is_none() {
        let temp = TempDir::new().unwrap();
        assert_eq!(read_marker(&temp.path().join(MARKER_FILE)).unwrap(), None);
    }

    #[test]
    fn marker_under_a_file_is_none() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("cache");
        fs::write(&file, "x").unwrap();
        assert_eq!(read_marker(&file.join(MARKER_FILE)).unwrap(), None);
    }

    #[test]
    fn empty_marker_is_empty_string() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(MARKER_FILE);
        fs::write(&path, "").unwrap();
        assert_eq!(read_marker(&path).unwrap(), Some(String::new()));
    }

    #[test]
    fn marker_is_trimmed() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(MARKER_FILE);
        fs::write(&path, "3.1.0\n").unwrap();
        assert_eq!(read_marker(&path).unwrap(), Some("3.1.0".to_string()));
    }

    #[test]
    fn write_then_read() {
        let temp = TempDir::new().unwrap();
        write_marker(temp.path(), "8.0.0").unwrap();

        let path = temp.path().join(MARKER_FILE);
        assert_eq!(fs::read_to_string(&path).unwrap(), "8.0.0");
        assert_eq!(read_marker(&path).unwrap(), Some("8.0.0".to_string()));
    }

    #[test]
    fn write_overwrites_existing_marker() {
        let temp = TempDir::new().unwrap();
        write_marker(temp.path(), "3.1.0").unwrap();
        write_marker(temp.path(), "3.1.9").unwrap();

        assert_eq!(
            fs::read_to_string(temp.path().join(MARKER_FILE)).unwrap(),
            "3.1.9"
        );
    }

    #[test]
    fn write_leaves_no_temporary_files() {
        let temp = TempDir::new().unwrap();
        write_marker(temp.path(), "1.0.0").unwrap();

        let names: Vec<_> = fs::read_dir(temp.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(names, vec![std::ffi::OsString::from(MARKER_FILE)]);
    }

    #[test]
    fn write_into_missing_dir_fails() {
        let temp = TempDir::new().unwrap();
        assert!(write_marker(&temp.path().join("absent"), "1.0.0").is_err());
    }
}
