//! Response caching strategies.
//!
//! The cache is keyed by request URL only. A cached body is served in place
//! of a network call for as long as the strategy considers it fresh, so a
//! cache trades freshness for speed and must be chosen explicitly.

use std::{
  io,
  path::{Path, PathBuf},
  time::Duration,
};

use bytes::Bytes;
use serde::Deserialize;
use sha2::{Digest, Sha256};

/// Which caching strategy to use, as named in configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheMode {
  /// Always go to the network.
  #[default]
  None,
  /// Keep responses on disk forever.
  Persistent,
  /// Keep responses on disk, refetching entries older than a TTL.
  Ttl,
}

/// A response cache.
#[derive(Debug, Clone)]
pub enum ResponseCache {
  Disabled,
  Disk(DiskCache),
}

impl ResponseCache {
  /// Build the cache named by `mode`. `ttl` only matters for
  /// [`CacheMode::Ttl`].
  pub fn new(mode: CacheMode, dir: impl Into<PathBuf>, ttl: Duration) -> Self {
    match mode {
      CacheMode::None => ResponseCache::Disabled,
      CacheMode::Persistent => ResponseCache::Disk(DiskCache::new(dir, None)),
      CacheMode::Ttl => ResponseCache::Disk(DiskCache::new(dir, Some(ttl))),
    }
  }

  /// A fresh cached body for `url`, if any.
  pub async fn get(&self, url: &str) -> io::Result<Option<Bytes>> {
    match self {
      ResponseCache::Disabled => Ok(None),
      ResponseCache::Disk(disk) => disk.get(url).await,
    }
  }

  pub async fn put(&self, url: &str, body: &[u8]) -> io::Result<()> {
    match self {
      ResponseCache::Disabled => Ok(()),
      ResponseCache::Disk(disk) => disk.put(url, body).await,
    }
  }
}

/// Response bodies stored as one file per URL, named by the hex SHA-256 of
/// the URL. Freshness is judged from the file's modification time.
#[derive(Debug, Clone)]
pub struct DiskCache {
  dir: PathBuf,
  ttl: Option<Duration>,
}

impl DiskCache {
  pub fn new(dir: impl Into<PathBuf>, ttl: Option<Duration>) -> Self {
    Self { dir: dir.into(), ttl }
  }

  pub fn dir(&self) -> &Path { &self.dir }

  /// Path of the entry for `url`, whether or not it exists.
  pub fn entry_path(&self, url: &str) -> PathBuf {
    let digest = Sha256::digest(url.as_bytes());
    self.dir.join(format!("{}.json", hex::encode(digest)))
  }

  pub async fn get(&self, url: &str) -> io::Result<Option<Bytes>> {
    let path = self.entry_path(url);
    let meta = match tokio::fs::metadata(&path).await {
      Ok(meta) => meta,
      Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
      Err(e) => return Err(e),
    };

    if let Some(ttl) = self.ttl {
      // A modification time in the future counts as brand new.
      let age = meta.modified()?.elapsed().unwrap_or_default();
      if age > ttl {
        return Ok(None);
      }
    }

    Ok(Some(Bytes::from(tokio::fs::read(&path).await?)))
  }

  pub async fn put(&self, url: &str, body: &[u8]) -> io::Result<()> {
    tokio::fs::create_dir_all(&self.dir).await?;
    let path = self.entry_path(url);
    let tmp = path.with_extension("tmp");
    tokio::fs::write(&tmp, body).await?;
    tokio::fs::rename(&tmp, &path).await
  }
}
