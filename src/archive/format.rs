//! Archive container formats.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Container format of a downloaded artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArchiveFormat {
    /// Gzip-compressed tar archive.
    #[serde(rename = "tar.gz", alias = "tgz")]
    TarGz,
    /// Zip archive.
    #[serde(rename = "zip")]
    Zip,
}

impl ArchiveFormat {
    /// Infer the format from a URL's file-extension suffix.
    ///
    /// Query strings and fragments are ignored. Returns `None` for any
    /// suffix other than `.tar.gz`, `.tgz` or `.zip`.
    pub fn from_url(url: &str) -> Option<Self> {
        let path = url.split(['?', '#']).next().unwrap_or(url);
        let path = path.to_ascii_lowercase();

        if path.ends_with(".tar.gz") || path.ends_with(".tgz") {
            Some(Self::TarGz)
        } else if path.ends_with(".zip") {
            Some(Self::Zip)
        } else {
            None
        }
    }

    /// Canonical file extension, without the leading dot.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::TarGz => "tar.gz",
            Self::Zip => "zip",
        }
    }
}

impl fmt::Display for ArchiveFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}
