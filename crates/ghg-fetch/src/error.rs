//! Error type for `ghg-fetch`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("failed to build HTTP client: {0}")]
  Client(#[source] reqwest::Error),

  /// The request never produced a response body.
  #[error("GET {url} failed: {source}")]
  Transport {
    url:    String,
    #[source]
    source: reqwest::Error,
  },

  #[error("GET {url} returned {status}")]
  Status {
    url:    String,
    status: reqwest::StatusCode,
  },

  /// The body was not a JSON array.
  #[error("GET {url} returned an unusable body: {source}")]
  Decode {
    url:    String,
    #[source]
    source: ghg_core::Error,
  },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
