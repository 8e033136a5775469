//! Platform identifiers.
//!
//! The set of platforms is closed: every runtime manifest keys its artifacts
//! by one of these identifiers, and each one owns a subdirectory of the
//! cache root named after [`Platform::as_str`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::RuntimeCacheError;

/// A target platform for runtime artifacts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Windows,
    Linux,
    Mac,
}

impl Platform {
    /// All known platforms.
    pub const ALL: [Platform; 3] = [Platform::Windows, Platform::Linux, Platform::Mac];

    /// The identifier token, also used as the cache subdirectory name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Windows => "windows",
            Platform::Linux => "linux",
            Platform::Mac => "mac",
        }
    }

    /// Comma-separated list of all identifiers, for error messages.
    pub fn expected_tokens() -> String {
        Self::ALL
            .iter()
            .map(|p| p.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = RuntimeCacheError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| RuntimeCacheError::UnknownPlatform {
                token: s.to_string(),
                expected: Self::expected_tokens(),
            })
    }
}

/// Parse a list of platform tokens, keeping request order and dropping repeats.
///
/// Fails on the first token that is not a known platform.
pub fn parse_platforms<S: AsRef<str>>(tokens: &[S]) -> crate::Result<Vec<Platform>> {
    let mut platforms = Vec::with_capacity(tokens.len());
    for token in tokens {
        let platform: Platform = token.as_ref().parse()?;
        if !platforms.contains(&platform) {
            platforms.push(platform);
        }
    }
    Ok(platforms)
}
