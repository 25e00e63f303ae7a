//! Error types for `ghg-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// A fetched payload was not a JSON array of objects.
  #[error("expected a JSON array of objects, found {0}")]
  NotAnArray(&'static str),

  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
