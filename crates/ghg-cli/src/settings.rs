//! Runtime settings: an optional TOML file overlaid by `GHG_*` environment
//! variables.

use std::{
  path::{Path, PathBuf},
  time::Duration,
};

use anyhow::Context as _;
use ghg_fetch::{CacheMode, ClientConfig, DEFAULT_BASE_URL, ResponseCache};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
  /// SQLite database file.
  pub database_path:  PathBuf,
  pub base_url:       String,
  pub cache:          CacheMode,
  pub cache_dir:      PathBuf,
  /// Only used with `cache = "ttl"`.
  pub cache_ttl_secs: u64,
  /// Rows per request; unset fetches each resource in one request.
  pub page_size:      Option<u32>,
  pub timeout_secs:   u64,
}

impl Default for Settings {
  fn default() -> Self {
    Self {
      database_path:  PathBuf::from("emissions_facility.db"),
      base_url:       DEFAULT_BASE_URL.to_owned(),
      cache:          CacheMode::None,
      cache_dir:      PathBuf::from("http_cache"),
      cache_ttl_secs: 24 * 60 * 60,
      page_size:      None,
      timeout_secs:   300,
    }
  }
}

impl Settings {
  /// Read `path` if it exists, then apply `GHG_*` overrides.
  pub fn load(path: &Path) -> anyhow::Result<Self> {
    config::Config::builder()
      .add_source(config::File::from(path).required(false))
      .add_source(config::Environment::with_prefix("GHG").try_parsing(true))
      .build()
      .with_context(|| format!("failed to read config file {}", path.display()))?
      .try_deserialize()
      .context("failed to deserialise settings")
  }

  pub fn client_config(&self) -> ClientConfig {
    ClientConfig {
      base_url:  self.base_url.clone(),
      timeout:   Duration::from_secs(self.timeout_secs),
      page_size: self.page_size,
      cache:     ResponseCache::new(
        self.cache,
        self.cache_dir.clone(),
        Duration::from_secs(self.cache_ttl_secs),
      ),
    }
  }
}
