//! Error type for `ghg-sync`.

use ghg_core::Table;
use thiserror::Error;

/// A sync aborted at the first resource that failed.
#[derive(Debug, Error)]
pub enum Error {
  #[error("fetching {resource} failed: {source}")]
  Fetch {
    resource: &'static str,
    #[source]
    source:   Box<dyn std::error::Error + Send + Sync>,
  },

  #[error("loading table `{table}` failed: {source}")]
  Load {
    table:  Table,
    #[source]
    source: Box<dyn std::error::Error + Send + Sync>,
  },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
