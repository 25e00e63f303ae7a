//! Error type for `ghg-store-sqlite`.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  /// The database file has not been created yet.
  #[error("database {0:?} does not exist; run `ghg init` to create it")]
  DatabaseMissing(PathBuf),

  /// The database exists but lacks some of the expected tables.
  #[error("database is missing tables {0:?}; run `ghg init` to create them")]
  SchemaMissing(Vec<&'static str>),

  /// A table the caller needs is empty.
  #[error("table `{0}` is empty; run `ghg sync` to populate it")]
  EmptyTable(&'static str),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
