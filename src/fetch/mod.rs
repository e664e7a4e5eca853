//! Export downloading.
//!
//! Fetches the published table set (CSV exports plus the precompute blob)
//! into the local data directory. Tables are independent: downloads run
//! concurrently, failures are per-table, and the whole set is joined before
//! the caller reloads a snapshot.

use std::path::PathBuf;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use reqwest::Client;
use thiserror::Error;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, warn};
use url::Url;

use crate::storage::{StorageConfig, Table};

/// Errors that can occur during fetching.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("HTTP {status} for {url}")]
    HttpStatus { status: u16, url: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration for the export fetcher.
#[derive(Debug, Clone)]
pub struct FetcherConfig {
    /// Base URL the exports are published under. Tables live at
    /// `<base>/csv/<TABLE>.csv`, the blob at `<base>/json/precomp.json`.
    pub base_url: String,

    /// Request timeout.
    pub timeout: Duration,

    /// User agent string.
    pub user_agent: String,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            base_url: "https://example.com/static".to_string(),
            timeout: Duration::from_secs(30),
            user_agent: format!("geotest-stats/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Result of one `sync` run.
#[derive(Debug, Default)]
pub struct SyncReport {
    pub fetched: Vec<String>,
    pub failed: Vec<(String, String)>,
}

/// HTTP fetcher for the export set.
pub struct Fetcher {
    client: Client,
    config: FetcherConfig,
}

impl Fetcher {
    /// Create a new fetcher with the given configuration.
    pub fn new(config: FetcherConfig) -> Result<Self, FetchError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&config.user_agent)
                .unwrap_or_else(|_| HeaderValue::from_static("geotest-stats/0.1.0")),
        );

        let client = Client::builder()
            .timeout(config.timeout)
            .default_headers(headers)
            .build()?;

        Ok(Self { client, config })
    }

    /// Download every table and the precompute blob into the data
    /// directory. Each download is independent; the report lists what
    /// succeeded and what failed.
    pub async fn sync_all(&self, storage: &StorageConfig) -> Result<SyncReport, FetchError> {
        tokio::fs::create_dir_all(storage.csv_dir()).await?;
        tokio::fs::create_dir_all(storage.json_dir()).await?;

        let mut downloads: Vec<(String, Url, PathBuf)> = Vec::new();
        for table in Table::ALL {
            let remote = format!("csv/{}", table.filename());
            downloads.push((
                table.filename().to_string(),
                self.export_url(&remote)?,
                storage.table_path(table),
            ));
        }
        downloads.push((
            "precomp.json".to_string(),
            self.export_url("json/precomp.json")?,
            storage.precompute_path(),
        ));

        let mut tasks = tokio::task::JoinSet::new();
        for (name, url, dest) in downloads {
            let client = self.client.clone();
            tasks.spawn(async move {
                let outcome = download_one(&client, &url, &dest).await;
                (name, outcome)
            });
        }

        let mut report = SyncReport::default();
        while let Some(joined) = tasks.join_next().await {
            let Ok((name, outcome)) = joined else {
                continue;
            };
            match outcome {
                Ok(bytes) => {
                    debug!("Fetched {name} ({bytes} bytes)");
                    report.fetched.push(name);
                }
                Err(e) => {
                    warn!("Failed to fetch {name}: {e}");
                    report.failed.push((name, e.to_string()));
                }
            }
        }
        report.fetched.sort();
        report.failed.sort();

        info!(
            fetched = report.fetched.len(),
            failed = report.failed.len(),
            "Sync complete"
        );
        Ok(report)
    }

    fn export_url(&self, relative: &str) -> Result<Url, FetchError> {
        let joined = format!("{}/{}", self.config.base_url.trim_end_matches('/'), relative);
        Url::parse(&joined).map_err(|_| FetchError::InvalidUrl(joined))
    }
}

async fn download_one(client: &Client, url: &Url, dest: &PathBuf) -> Result<usize, FetchError> {
    let response = client.get(url.clone()).send().await?;
    if !response.status().is_success() {
        return Err(FetchError::HttpStatus {
            status: response.status().as_u16(),
            url: url.to_string(),
        });
    }
    let body = response.bytes().await?;
    let mut file = tokio::fs::File::create(dest).await?;
    file.write_all(&body).await?;
    file.flush().await?;
    Ok(body.len())
}
