//! Asset downloads for archived articles.
//!
//! - One shared `reqwest` client with connect/request timeouts and a user agent
//! - Bodies are streamed to `<dest>.part` and renamed into place on success
//! - Failed downloads never leave a file under the destination name
//! - No retries: every asset is attempted exactly once
//!
//! Example (no_run):
//! ```rust,no_run
//! # async fn demo() -> Result<(), folio_http::FetchError> {
//! use folio_http::{AssetFetcher, FetchOptions};
//! use std::path::Path;
//!
//! let fetcher = AssetFetcher::new(FetchOptions::default())?;
//! let url = url::Url::parse("https://example.com/cover.png").unwrap();
//! let bytes = fetcher.fetch(&url, Path::new("images/image_0.png")).await?;
//! assert!(bytes > 0);
//! # Ok(()) }
//! ```
//!
//! Observability: `tracing` events `http.asset.start`, `http.asset.done` and
//! `http.asset.error` carry the URL, status, byte count and duration.

use futures::StreamExt;
use reqwest::{Client, StatusCode};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use thiserror::Error;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use url::Url;

// ==============================
// Errors
// ==============================

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("unsupported asset URL: {0}")]
    Url(String),
    #[error("client build failed: {0}")]
    Build(String),
    #[error("network error fetching {url}: {message}")]
    Network { url: String, message: String },
    #[error("server returned {status} for {url}")]
    Status { status: StatusCode, url: String },
    #[error("i/o error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

// ==============================
// Options
// ==============================

/// Client-wide tuning knobs for asset downloads.
///
/// ```
/// use folio_http::FetchOptions;
/// use std::time::Duration;
///
/// let opts = FetchOptions {
///     timeout: Duration::from_secs(10),
///     ..Default::default()
/// };
/// assert_eq!(opts.connect_timeout, Duration::from_secs(5));
/// ```
#[derive(Clone, Debug)]
pub struct FetchOptions {
    pub timeout: Duration,
    pub connect_timeout: Duration,
    pub user_agent: String,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(5),
            user_agent: concat!("folio/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

// ==============================
// Fetcher
// ==============================

#[derive(Clone)]
pub struct AssetFetcher {
    inner: Client,
    timeout: Duration,
}

impl AssetFetcher {
    pub fn new(opts: FetchOptions) -> Result<Self, FetchError> {
        let inner = Client::builder()
            .connect_timeout(opts.connect_timeout)
            .user_agent(opts.user_agent)
            .build()
            .map_err(|e| FetchError::Build(e.to_string()))?;
        Ok(Self {
            inner,
            timeout: opts.timeout,
        })
    }

    /// Download `url` into `dest`, returning the number of bytes written.
    ///
    /// The call completes only once the file is fully written and renamed
    /// into place.
    pub async fn fetch(&self, url: &Url, dest: &Path) -> Result<u64, FetchError> {
        if !matches!(url.scheme(), "http" | "https") {
            return Err(FetchError::Url(url.to_string()));
        }

        let partial = partial_path(dest);
        let t0 = Instant::now();
        tracing::debug!(
            %url,
            dest=%dest.display(),
            timeout_ms=self.timeout.as_millis() as u64,
            "http.asset.start"
        );

        match self.download(url, &partial).await {
            Ok(bytes) => {
                fs::rename(&partial, dest).await.map_err(|source| {
                    FetchError::Io {
                        path: dest.to_path_buf(),
                        source,
                    }
                })?;
                tracing::debug!(
                    %url,
                    bytes,
                    duration_ms=t0.elapsed().as_millis() as u64,
                    "http.asset.done"
                );
                Ok(bytes)
            }
            Err(err) => {
                // Best effort: the partial file may not exist yet.
                let _ = fs::remove_file(&partial).await;
                tracing::warn!(
                    %url,
                    duration_ms=t0.elapsed().as_millis() as u64,
                    error=%err,
                    "http.asset.error"
                );
                Err(err)
            }
        }
    }

    async fn download(&self, url: &Url, partial: &Path) -> Result<u64, FetchError> {
        let network = |e: reqwest::Error| FetchError::Network {
            url: url.to_string(),
            message: e.to_string(),
        };
        let io = |source: std::io::Error| FetchError::Io {
            path: partial.to_path_buf(),
            source,
        };

        let resp = self
            .inner
            .get(url.clone())
            .timeout(self.timeout)
            .send()
            .await
            .map_err(network)?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status,
                url: url.to_string(),
            });
        }

        let mut file = fs::File::create(partial).await.map_err(io)?;
        let mut written = 0u64;
        let mut stream = resp.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(network)?;
            file.write_all(&chunk).await.map_err(io)?;
            written += chunk.len() as u64;
        }
        file.flush().await.map_err(io)?;
        file.sync_all().await.map_err(io)?;

        Ok(written)
    }
}

fn partial_path(dest: &Path) -> PathBuf {
    let mut name = OsString::from(dest.as_os_str());
    name.push(".part");
    PathBuf::from(name)
}
