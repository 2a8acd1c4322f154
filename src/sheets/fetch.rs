use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use thiserror::Error;

/// Where a sheet's CSV text comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceLocator {
    Url(String),
    File(PathBuf),
}

impl SourceLocator {
    /// Parse a configured locator: `http(s)://` is fetched, anything else is a path
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.starts_with("http://") || raw.starts_with("https://") {
            SourceLocator::Url(raw.to_string())
        } else if let Some(path) = raw.strip_prefix("file://") {
            SourceLocator::File(PathBuf::from(path))
        } else {
            SourceLocator::File(PathBuf::from(raw))
        }
    }
}

impl fmt::Display for SourceLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceLocator::Url(url) => f.write_str(url),
            SourceLocator::File(path) => write!(f, "{}", path.display()),
        }
    }
}

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Server returned {status} for {url}")]
    Status { status: u16, url: String },

    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Capability to turn a locator into raw CSV text
#[async_trait]
pub trait SheetFetcher: Send + Sync {
    async fn fetch(&self, locator: &SourceLocator) -> Result<String, FetchError>;
}

/// Fetches published sheets over HTTP and local exports from disk
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Create a fetcher. `timeout` of `None` waits indefinitely.
    pub fn new(timeout: Option<Duration>) -> Result<Self, FetchError> {
        let mut builder = Client::builder().user_agent(concat!("kartei/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self::from_client(builder.build()?))
    }

    /// Wrap an already configured client
    pub fn from_client(client: Client) -> Self {
        Self { client }
    }

    async fn get(&self, url: &str) -> Result<String, FetchError> {
        let response = self.client.get(url).send().await?;

        match response.status() {
            status if !status.is_success() => {
                return Err(FetchError::Status {
                    status: status.as_u16(),
                    url: url.to_string(),
                });
            }
            StatusCode::NO_CONTENT => return Ok(String::new()),
            _ => {}
        }

        Ok(response.text().await?)
    }
}

async fn read_file(path: &Path) -> Result<String, FetchError> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|source| FetchError::Io {
            path: path.to_path_buf(),
            source,
        })
}

#[async_trait]
impl SheetFetcher for HttpFetcher {
    async fn fetch(&self, locator: &SourceLocator) -> Result<String, FetchError> {
        log::debug!("fetch: {}", locator);
        match locator {
            SourceLocator::Url(url) => self.get(url).await,
            SourceLocator::File(path) => read_file(path).await,
        }
    }
}
