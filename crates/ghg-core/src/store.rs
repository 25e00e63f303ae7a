//! The `GhgStore` trait.
//!
//! Implemented by storage backends (e.g. `ghg-store-sqlite`). The pipeline
//! and the CLI depend on this abstraction, not on a concrete backend.

use std::future::Future;

use crate::{
  Table, Year,
  record::Batch,
  report::{FacilitySummary, GasTotal, StateTotal, Summary},
};

/// Abstraction over the local relational store.
///
/// Writes are upserts: a row whose declared key matches an existing row
/// replaces it. Tables without a declared key simply accumulate rows.
pub trait GhgStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Writes ────────────────────────────────────────────────────────────

  /// Write every record in `batch` to its table inside one transaction.
  /// Returns the number of rows written.
  fn load(
    &self,
    batch: Batch,
  ) -> impl Future<Output = Result<usize, Self::Error>> + Send + '_;

  // ── Reads ─────────────────────────────────────────────────────────────

  /// Number of rows currently in `table`.
  fn count(
    &self,
    table: Table,
  ) -> impl Future<Output = Result<u64, Self::Error>> + Send + '_;

  /// Fail unless the store holds emission data to report on.
  fn require_populated(
    &self,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Descriptive statistics of `co2e_emission`, optionally for one year.
  /// `None` when there are no non-null values.
  fn emission_summary(
    &self,
    year: Option<Year>,
  ) -> impl Future<Output = Result<Option<Summary>, Self::Error>> + Send + '_;

  /// Number of facility rows and statistics of their coordinates,
  /// optionally for one year. Null coordinates are skipped.
  fn facility_summary(
    &self,
    year: Option<Year>,
  ) -> impl Future<Output = Result<FacilitySummary, Self::Error>> + Send + '_;

  /// Emissions joined with their facility and summed per
  /// `(facility_id, year, gas_id)`, ordered by those keys.
  fn totals_by_gas(
    &self,
    year: Option<Year>,
  ) -> impl Future<Output = Result<Vec<GasTotal>, Self::Error>> + Send + '_;

  /// Emissions joined with their facility and summed per facility state,
  /// largest total first.
  fn totals_by_state(
    &self,
    year: Option<Year>,
  ) -> impl Future<Output = Result<Vec<StateTotal>, Self::Error>> + Send + '_;
}
