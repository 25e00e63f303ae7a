//! Async HTTP client for the EPA data service.

use std::time::Duration;

use bytes::Bytes;
use ghg_core::{Resource, Year, record::parse_array, source::RecordSource};
use reqwest::Client;
use serde_json::Value;

use crate::{Error, ResponseCache, Result};

/// Base URL of the EPA data service.
pub const DEFAULT_BASE_URL: &str = "https://data.epa.gov/dmapservice";

/// Connection settings for [`EpaClient`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
  pub base_url:  String,
  pub timeout:   Duration,
  /// Fetch in windows of this many rows. `None` (or zero) issues a single
  /// request per resource and year.
  pub page_size: Option<u32>,
  pub cache:     ResponseCache,
}

impl Default for ClientConfig {
  fn default() -> Self {
    Self {
      base_url:  DEFAULT_BASE_URL.to_owned(),
      timeout:   Duration::from_secs(300),
      page_size: None,
      cache:     ResponseCache::Disabled,
    }
  }
}

/// HTTP client for the EPA REST resources.
///
/// The inner [`reqwest::Client`] is `Arc`-based, so clones share a pool.
#[derive(Debug, Clone)]
pub struct EpaClient {
  http:      Client,
  base_url:  String,
  page_size: Option<u32>,
  cache:     ResponseCache,
}

impl EpaClient {
  pub fn new(config: ClientConfig) -> Result<Self> {
    let http = Client::builder()
      .timeout(config.timeout)
      .build()
      .map_err(Error::Client)?;
    Ok(Self {
      http,
      base_url: config.base_url,
      page_size: config.page_size.filter(|n| *n > 0),
      cache: config.cache,
    })
  }

  pub fn base_url(&self) -> &str { &self.base_url }

  /// Fetch every record behind `url`, page by page when paging is enabled.
  ///
  /// Paging stops at the first short page, or when a page repeats the one
  /// before it (an upstream that ignores the row window).
  pub async fn fetch_all(&self, url: &str) -> Result<Vec<Value>> {
    let Some(size) = self.page_size else {
      return self.fetch_url(url).await;
    };

    let mut records = Vec::new();
    let mut previous: Vec<Value> = Vec::new();
    let mut start: u64 = 0;
    loop {
      let page = self.fetch_url(&page_url(url, start, size)).await?;
      if !previous.is_empty() && page == previous {
        tracing::warn!(%url, start, "row window ignored by upstream, stopping");
        break;
      }
      let full = page.len() >= size as usize;
      records.extend_from_slice(&page);
      if !full {
        break;
      }
      previous = page;
      start += u64::from(size);
    }
    Ok(records)
  }

  /// One GET, served from the cache when the cache has a fresh copy.
  pub async fn fetch_url(&self, url: &str) -> Result<Vec<Value>> {
    match self.cache.get(url).await {
      Ok(Some(body)) => {
        tracing::debug!(%url, "cache hit");
        if let Ok(records) = parse_array(&body) {
          return Ok(records);
        }
        tracing::warn!(%url, "ignoring unreadable cache entry");
      }
      Ok(None) => tracing::debug!(%url, "cache miss"),
      Err(e) => tracing::warn!(%url, error = %e, "cache read failed"),
    }

    let body = self.get(url).await?;
    let records = parse_array(&body).map_err(|source| Error::Decode {
      url: url.to_owned(),
      source,
    })?;

    if let Err(e) = self.cache.put(url, &body).await {
      tracing::warn!(%url, error = %e, "cache write failed");
    }
    Ok(records)
  }

  async fn get(&self, url: &str) -> Result<Bytes> {
    tracing::info!(%url, "GET");
    let transport = |source| Error::Transport { url: url.to_owned(), source };

    let resp = self.http.get(url).send().await.map_err(transport)?;
    if !resp.status().is_success() {
      return Err(Error::Status {
        url:    url.to_owned(),
        status: resp.status(),
      });
    }
    resp.bytes().await.map_err(transport)
  }
}

/// `{url}/rows/{start}:{end}`, where the row window is inclusive.
fn page_url(url: &str, start: u64, size: u32) -> String {
  let end = start + u64::from(size) - 1;
  format!("{}/rows/{start}:{end}", url.trim_end_matches('/'))
}

impl RecordSource for EpaClient {
  type Error = Error;

  async fn fetch(&self, resource: &Resource, year: Year) -> Result<Vec<Value>> {
    self.fetch_all(&resource.url(&self.base_url, year)).await
  }
}
