//! HTTP artifact downloads.
//!
//! One blocking GET per artifact, streamed to a writer. No resumption,
//! retries or integrity checks.

use anyhow::{bail, Context, Result};
use reqwest::blocking::Client;
use std::io::{ErrorKind, Read, Write};
use std::time::Duration;

use crate::ui::ProgressHandle;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);
const CHUNK_SIZE: usize = 64 * 1024;

/// Downloads artifacts over HTTP/HTTPS.
pub struct HttpFetcher {
    client: Client,
    timeout: Option<Duration>,
}

impl HttpFetcher {
    /// Create a fetcher with no overall request timeout.
    pub fn new() -> Result<Self> {
        Self::with_timeout(None)
    }

    /// Create a fetcher whose requests, body included, must finish within `timeout`.
    pub fn with_timeout(timeout: Option<Duration>) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("runtime-cache/", env!("CARGO_PKG_VERSION")))
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self { client, timeout })
    }

    /// Get the configured overall timeout.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Stream `url` into `out`, reporting bytes to `progress`.
    ///
    /// Returns the number of bytes written. Fails on connection errors,
    /// non-success statuses and bodies shorter than their Content-Length.
    pub fn download(
        &self,
        url: &str,
        out: &mut dyn Write,
        progress: &mut dyn ProgressHandle,
    ) -> Result<u64> {
        tracing::debug!("GET {}", url);

        let mut response = self
            .client
            .get(url)
            .send()
            .with_context(|| format!("Failed to fetch {}", url))?;

        if !response.status().is_success() {
            bail!("HTTP {} fetching {}", response.status(), url);
        }

        let expected = response.content_length();
        if let Some(len) = expected {
            progress.set_length(len);
        }

        let mut buf = vec![0u8; CHUNK_SIZE];
        let mut total = 0u64;
        loop {
            let n = match response.read(&mut buf) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => {
                    return Err(e).with_context(|| format!("Failed to read response from {}", url))
                }
            };
            out.write_all(&buf[..n])
                .context("Failed to write download to disk")?;
            total += n as u64;
            progress.advance(n as u64);
        }
        out.flush().context("Failed to write download to disk")?;

        if let Some(len) = expected {
            if total != len {
                bail!("Truncated response from {}: got {} of {} bytes", url, total, len);
            }
        }

        tracing::debug!("Downloaded {} bytes from {}", total, url);
        Ok(total)
    }
}
