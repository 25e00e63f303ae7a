//! [`SqliteStore`]: the SQLite implementation of [`GhgStore`].

use std::path::Path;

use ghg_core::{
  Table, Year,
  record::Batch,
  report::{FacilitySummary, GasTotal, StateTotal, Summary},
  store::GhgStore,
};

use crate::{
  Error, Result,
  encode::{Row, insert_sql},
  schema::{CONNECTION_PRAGMAS, SCHEMA},
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// The GHG store backed by a single SQLite file.
///
/// Clones share one reference-counted connection.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Create the database file if needed and make sure every table exists.
  /// Existing tables and their rows are left alone.
  pub async fn create(path: impl AsRef<Path>) -> Result<Self> {
    let store = Self::connect(tokio_rusqlite::Connection::open(path).await?).await?;
    store.init_schema().await?;
    Ok(store)
  }

  /// Open a database previously set up with [`SqliteStore::create`].
  ///
  /// Never creates the file: a missing file or missing tables are reported
  /// as [`Error::DatabaseMissing`] and [`Error::SchemaMissing`].
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    if !path.exists() {
      return Err(Error::DatabaseMissing(path.to_path_buf()));
    }
    let store = Self::connect(tokio_rusqlite::Connection::open(path).await?).await?;
    store.check_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store.
  pub async fn open_in_memory() -> Result<Self> {
    let store = Self::connect(tokio_rusqlite::Connection::open_in_memory().await?).await?;
    store.init_schema().await?;
    Ok(store)
  }

  async fn connect(conn: tokio_rusqlite::Connection) -> Result<Self> {
    conn
      .call(|conn| {
        conn.execute_batch(CONNECTION_PRAGMAS)?;
        Ok(())
      })
      .await?;
    Ok(Self { conn })
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn check_schema(&self) -> Result<()> {
    let present: Vec<String> = self
      .conn
      .call(|conn| {
        let mut stmt =
          conn.prepare("SELECT name FROM sqlite_master WHERE type = 'table'")?;
        let names = stmt
          .query_map([], |row| row.get(0))?
          .collect::<rusqlite::Result<Vec<String>>>()?;
        Ok(names)
      })
      .await?;

    let missing: Vec<&'static str> = Table::ALL
      .iter()
      .map(|t| t.name())
      .filter(|name| !present.iter().any(|p| p == name))
      .collect();

    if missing.is_empty() { Ok(()) } else { Err(Error::SchemaMissing(missing)) }
  }

  /// Write `rows` in one transaction. Returns the number of rows written.
  async fn load_rows<R: Row>(&self, rows: Vec<R>) -> Result<usize> {
    if rows.is_empty() {
      return Ok(0);
    }
    let sql = insert_sql::<R>();

    let written = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let mut written = 0;
        {
          let mut stmt = tx.prepare(&sql)?;
          for row in &rows {
            written += stmt.execute(rusqlite::params_from_iter(row.values()))?;
          }
        }
        tx.commit()?;
        Ok(written)
      })
      .await?;

    Ok(written)
  }
}

// ─── GhgStore impl ───────────────────────────────────────────────────────────

impl GhgStore for SqliteStore {
  type Error = Error;

  // ── Writes ────────────────────────────────────────────────────────────────

  async fn load(&self, batch: Batch) -> Result<usize> {
    match batch {
      Batch::Emissions(rows) => self.load_rows(rows).await,
      Batch::Facility(rows) => self.load_rows(rows).await,
      Batch::CSubpart(rows) => self.load_rows(rows).await,
      Batch::DSubpart(rows) => self.load_rows(rows).await,
    }
  }

  // ── Reads ─────────────────────────────────────────────────────────────────

  async fn count(&self, table: Table) -> Result<u64> {
    let sql = format!("SELECT COUNT(*) FROM {}", table.name());

    let n: i64 = self
      .conn
      .call(move |conn| Ok(conn.query_row(&sql, [], |row| row.get(0))?))
      .await?;

    Ok(n as u64)
  }

  async fn require_populated(&self) -> Result<()> {
    self.check_schema().await?;

    let populated: bool = self
      .conn
      .call(|conn| {
        Ok(conn.query_row("SELECT EXISTS (SELECT 1 FROM emissions)", [], |row| {
          row.get(0)
        })?)
      })
      .await?;

    if populated { Ok(()) } else { Err(Error::EmptyTable(Table::Emissions.name())) }
  }

  async fn emission_summary(&self, year: Option<Year>) -> Result<Option<Summary>> {
    let year = year.map(Year::get);

    let values: Vec<f64> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT co2e_emission FROM emissions
           WHERE co2e_emission IS NOT NULL
             AND (?1 IS NULL OR year = ?1)",
        )?;
        let values = stmt
          .query_map(rusqlite::params![year], |row| row.get(0))?
          .collect::<rusqlite::Result<Vec<f64>>>()?;
        Ok(values)
      })
      .await?;

    Ok(Summary::from_values(values))
  }

  async fn facility_summary(&self, year: Option<Year>) -> Result<FacilitySummary> {
    let year = year.map(Year::get);

    let coords: Vec<(Option<f64>, Option<f64>)> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT latitude, longitude FROM facility
           WHERE ?1 IS NULL OR year = ?1",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![year], |row| Ok((row.get(0)?, row.get(1)?)))?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    Ok(FacilitySummary {
      facilities: coords.len() as u64,
      latitude:   Summary::from_values(coords.iter().filter_map(|c| c.0)),
      longitude:  Summary::from_values(coords.iter().filter_map(|c| c.1)),
    })
  }

  async fn totals_by_gas(&self, year: Option<Year>) -> Result<Vec<GasTotal>> {
    let year = year.map(Year::get);

    let totals = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT e.facility_id, f.facility_name, f.year, e.gas_id,
                  TOTAL(e.co2e_emission)
           FROM emissions e
           JOIN facility  f ON f.facility_id = e.facility_id AND f.year = e.year
           WHERE ?1 IS NULL OR f.year = ?1
           GROUP BY e.facility_id, f.year, e.gas_id
           ORDER BY e.facility_id, f.year, e.gas_id",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![year], |row| {
            Ok(GasTotal {
              facility_id:   row.get(0)?,
              facility_name: row.get(1)?,
              year:          row.get(2)?,
              gas_id:        row.get(3)?,
              co2e_emission: row.get(4)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    Ok(totals)
  }

  async fn totals_by_state(&self, year: Option<Year>) -> Result<Vec<StateTotal>> {
    let year = year.map(Year::get);

    let totals = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT f.state, COUNT(DISTINCT f.facility_id), TOTAL(e.co2e_emission)
           FROM emissions e
           JOIN facility  f ON f.facility_id = e.facility_id AND f.year = e.year
           WHERE ?1 IS NULL OR f.year = ?1
           GROUP BY f.state
           ORDER BY 3 DESC, f.state",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![year], |row| {
            Ok(StateTotal {
              state:         row.get(0)?,
              facilities:    row.get::<_, i64>(1)? as u64,
              co2e_emission: row.get(2)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    Ok(totals)
  }
}
