//! The extract-load pipeline.
//!
//! [`sync`] walks [`RESOURCES`] in order. For each resource it fetches the
//! year's records, maps them onto the table's record type, and loads them in
//! one transaction. Steps never overlap. The first failure aborts the run;
//! tables loaded before it keep their rows.

pub mod error;

use chrono::{DateTime, Utc};
use ghg_core::{
  RESOURCES, Resource, Table, Year,
  record::{self, Decoded},
  source::RecordSource,
  store::GhgStore,
};

pub use error::{Error, Result};

/// What happened to one table during a sync.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableReport {
  pub table:    Table,
  /// Records returned by the upstream.
  pub fetched:  usize,
  /// Rows written to the table.
  pub loaded:   usize,
  /// Records that could not be mapped onto the table's record type.
  pub rejected: usize,
}

/// Outcome of a complete sync.
#[derive(Debug, Clone)]
pub struct SyncReport {
  pub year:        Year,
  pub started_at:  DateTime<Utc>,
  pub finished_at: DateTime<Utc>,
  /// One entry per resource, in load order.
  pub tables:      Vec<TableReport>,
}

impl SyncReport {
  pub fn total_loaded(&self) -> usize { self.tables.iter().map(|t| t.loaded).sum() }

  pub fn total_rejected(&self) -> usize { self.tables.iter().map(|t| t.rejected).sum() }
}

/// Fetch and load every resource for `year`.
pub async fn sync<S, D>(source: &S, store: &D, year: Year) -> Result<SyncReport>
where
  S: RecordSource,
  D: GhgStore,
{
  let started_at = Utc::now();
  tracing::info!(%year, "sync started");

  let mut tables = Vec::with_capacity(RESOURCES.len());
  for resource in &RESOURCES {
    tables.push(sync_resource(source, store, resource, year).await?);
  }

  let report = SyncReport { year, started_at, finished_at: Utc::now(), tables };
  tracing::info!(
    %year,
    loaded = report.total_loaded(),
    rejected = report.total_rejected(),
    "sync finished"
  );
  Ok(report)
}

/// Fetch, map and load a single resource.
pub async fn sync_resource<S, D>(
  source:   &S,
  store:    &D,
  resource: &Resource,
  year:     Year,
) -> Result<TableReport>
where
  S: RecordSource,
  D: GhgStore,
{
  tracing::info!(resource = resource.name, %year, "fetching");
  let records = source
    .fetch(resource, year)
    .await
    .map_err(|e| Error::Fetch { resource: resource.name, source: Box::new(e) })?;
  let fetched = records.len();

  let Decoded { batch, rejected } = record::decode(resource.table, records);
  for r in &rejected {
    tracing::warn!(
      resource = resource.name,
      index = r.index,
      reason = %r.reason,
      "skipping record"
    );
  }

  let loaded = store
    .load(batch)
    .await
    .map_err(|e| Error::Load { table: resource.table, source: Box::new(e) })?;
  tracing::info!(table = %resource.table, fetched, loaded, "loaded");

  Ok(TableReport {
    table: resource.table,
    fetched,
    loaded,
    rejected: rejected.len(),
  })
}
