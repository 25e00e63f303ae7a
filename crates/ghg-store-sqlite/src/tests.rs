//! Integration tests for `SqliteStore` against in-memory and on-disk
//! databases.

use ghg_core::{
  Table, Year,
  record::{Batch, CSubpart, DSubpart, Emission, Facility, decode},
  store::GhgStore,
};
use serde_json::json;

use crate::{Error, SqliteStore};

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn facility(facility_id: i64, year: i64, state: &str) -> Facility {
  Facility {
    facility_id,
    year,
    facility_name: Some(format!("Facility {facility_id}")),
    state: Some(state.into()),
    ..Default::default()
  }
}

fn emission(facility_id: i64, gas_id: i64, co2e: f64, year: i64) -> Emission {
  Emission {
    co2e_emission: Some(co2e),
    facility_id,
    gas_id: Some(gas_id),
    sub_part_id: Some(9),
    year,
  }
}

fn y(year: i64) -> Year { Year::new(year).unwrap() }

// ─── Loading ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn empty_batches_load_nothing() {
  let s = store().await;
  for table in Table::ALL {
    assert_eq!(s.load(Batch::empty(table)).await.unwrap(), 0);
    assert_eq!(s.count(table).await.unwrap(), 0);
  }
}

#[tokio::test]
async fn facility_replaces_on_composite_key() {
  let s = store().await;
  let payload = vec![json!({"facility_id": 5, "year": 2021, "facility_name": "Acme"})];

  for _ in 0..2 {
    let decoded = decode(Table::Facility, payload.clone());
    assert_eq!(s.load(decoded.batch).await.unwrap(), 1);
  }

  assert_eq!(s.count(Table::Facility).await.unwrap(), 1);
}

#[tokio::test]
async fn facility_replacement_overwrites_attributes() {
  let s = store().await;
  s.load(Batch::Facility(vec![facility(5, 2021, "TX")]))
    .await
    .unwrap();
  s.load(Batch::Facility(vec![facility(5, 2021, "OK"), facility(5, 2020, "TX")]))
    .await
    .unwrap();
  s.load(Batch::Emissions(vec![emission(5, 1, 10.0, 2021)]))
    .await
    .unwrap();

  assert_eq!(s.count(Table::Facility).await.unwrap(), 2);
  let by_state = s.totals_by_state(Some(y(2021))).await.unwrap();
  assert_eq!(by_state.len(), 1);
  assert_eq!(by_state[0].state.as_deref(), Some("OK"));
}

// The unkeyed tables do not deduplicate. If this ever changes it should be
// a deliberate schema decision, so the duplication is pinned here.
#[tokio::test]
async fn unkeyed_tables_accumulate_duplicates_across_runs() {
  let s = store().await;
  let payload = vec![json!({
    "co2e_emission": 12.5,
    "facility_id": 5,
    "gas_id": 1,
    "sub_part_id": 9,
    "year": 2021
  })];

  for _ in 0..2 {
    s.load(decode(Table::Emissions, payload.clone()).batch)
      .await
      .unwrap();
  }
  assert_eq!(s.count(Table::Emissions).await.unwrap(), 2);

  let c = CSubpart {
    facility_id:    5,
    facility_name:  Some("Acme".into()),
    ghg_gas_name:   Some("Methane".into()),
    ghg_quantity:   Some(1.0),
    reporting_year: 2021,
  };
  let d = DSubpart {
    facility_id:    5,
    facility_name:  Some("Acme".into()),
    ghg_name:       Some("Methane".into()),
    ghg_quantity:   Some(1.0),
    reporting_year: 2021,
  };
  for _ in 0..2 {
    s.load(Batch::CSubpart(vec![c.clone()])).await.unwrap();
    s.load(Batch::DSubpart(vec![d.clone()])).await.unwrap();
  }
  assert_eq!(s.count(Table::CSubpart).await.unwrap(), 2);
  assert_eq!(s.count(Table::DSubpart).await.unwrap(), 2);
}

// ─── Reporting ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn totals_by_gas_sums_each_gas_separately() {
  let s = store().await;
  s.load(Batch::Facility(vec![facility(5, 2021, "TX")]))
    .await
    .unwrap();
  s.load(Batch::Emissions(vec![
    emission(5, 1, 100.0, 2021),
    emission(5, 2, 7.0, 2021),
    emission(5, 1, 50.0, 2021),
  ]))
  .await
  .unwrap();

  let totals = s.totals_by_gas(None).await.unwrap();
  assert_eq!(totals.len(), 2);

  assert_eq!(totals[0].facility_id, 5);
  assert_eq!(totals[0].year, 2021);
  assert_eq!(totals[0].gas_id, Some(1));
  assert_eq!(totals[0].co2e_emission, 150.0);
  assert_eq!(totals[0].facility_name.as_deref(), Some("Facility 5"));

  assert_eq!(totals[1].gas_id, Some(2));
  assert_eq!(totals[1].co2e_emission, 7.0);
}

#[tokio::test]
async fn totals_join_on_facility_and_year() {
  let s = store().await;
  s.load(Batch::Facility(vec![facility(5, 2020, "TX"), facility(5, 2021, "TX")]))
    .await
    .unwrap();
  s.load(Batch::Emissions(vec![emission(5, 1, 1.0, 2020), emission(5, 1, 2.0, 2021)]))
    .await
    .unwrap();

  let all = s.totals_by_gas(None).await.unwrap();
  assert_eq!(all.len(), 2);
  assert_eq!((all[0].year, all[0].co2e_emission), (2020, 1.0));
  assert_eq!((all[1].year, all[1].co2e_emission), (2021, 2.0));

  let only_2021 = s.totals_by_gas(Some(y(2021))).await.unwrap();
  assert_eq!(only_2021.len(), 1);
  assert_eq!(only_2021[0].co2e_emission, 2.0);
}

#[tokio::test]
async fn totals_by_state_orders_largest_first() {
  let s = store().await;
  s.load(Batch::Facility(vec![
    facility(1, 2021, "AL"),
    facility(2, 2021, "TX"),
    facility(3, 2021, "TX"),
  ]))
  .await
  .unwrap();
  s.load(Batch::Emissions(vec![
    emission(1, 1, 30.0, 2021),
    emission(2, 1, 20.0, 2021),
    emission(3, 2, 25.0, 2021),
  ]))
  .await
  .unwrap();

  let totals = s.totals_by_state(Some(y(2021))).await.unwrap();
  assert_eq!(totals.len(), 2);
  assert_eq!(totals[0].state.as_deref(), Some("TX"));
  assert_eq!(totals[0].facilities, 2);
  assert_eq!(totals[0].co2e_emission, 45.0);
  assert_eq!(totals[1].state.as_deref(), Some("AL"));
  assert_eq!(totals[1].facilities, 1);
}

#[tokio::test]
async fn emission_summary_filters_by_year_and_skips_nulls() {
  let s = store().await;
  let mut no_value = emission(1, 1, 0.0, 2021);
  no_value.co2e_emission = None;
  s.load(Batch::Emissions(vec![
    emission(1, 1, 1.0, 2021),
    emission(1, 2, 3.0, 2021),
    emission(1, 1, 100.0, 2020),
    no_value,
  ]))
  .await
  .unwrap();

  let summary = s.emission_summary(Some(y(2021))).await.unwrap().unwrap();
  assert_eq!(summary.count, 2);
  assert_eq!(summary.mean, 2.0);

  let all = s.emission_summary(None).await.unwrap().unwrap();
  assert_eq!(all.count, 3);
  assert_eq!(all.max, 100.0);

  assert!(s.emission_summary(Some(y(1999))).await.unwrap().is_none());
}

#[tokio::test]
async fn facility_summary_skips_missing_coordinates() {
  let s = store().await;
  let mut placed = facility(1, 2021, "TX");
  placed.latitude = Some(30.0);
  placed.longitude = Some(-97.0);
  let mut also_placed = facility(2, 2021, "TX");
  also_placed.latitude = Some(32.0);
  s.load(Batch::Facility(vec![placed, also_placed, facility(3, 2020, "AL")]))
    .await
    .unwrap();

  let all = s.facility_summary(None).await.unwrap();
  assert_eq!(all.facilities, 3);
  assert_eq!(all.latitude.as_ref().map(|l| (l.count, l.mean)), Some((2, 31.0)));
  assert_eq!(all.longitude.as_ref().map(|l| l.count), Some(1));

  let old = s.facility_summary(Some(y(2020))).await.unwrap();
  assert_eq!(old.facilities, 1);
  assert!(old.latitude.is_none());
}

// ─── Preconditions ───────────────────────────────────────────────────────────

#[tokio::test]
async fn require_populated_rejects_empty_emissions() {
  let s = store().await;
  assert!(matches!(
    s.require_populated().await,
    Err(Error::EmptyTable("emissions"))
  ));

  s.load(Batch::Emissions(vec![emission(1, 1, 1.0, 2021)]))
    .await
    .unwrap();
  s.require_populated().await.unwrap();
}

#[tokio::test]
async fn open_requires_existing_file() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("missing.db");

  assert!(matches!(
    SqliteStore::open(&path).await,
    Err(Error::DatabaseMissing(p)) if p == path
  ));
  assert!(!path.exists());
}

#[tokio::test]
async fn open_requires_schema() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("bare.db");
  std::fs::File::create(&path).unwrap();

  match SqliteStore::open(&path).await {
    Err(Error::SchemaMissing(missing)) => {
      assert_eq!(missing, vec!["emissions", "facility", "c_subpart", "d_subpart"]);
    }
    Err(other) => panic!("unexpected error: {other}"),
    Ok(_) => panic!("opened a database without tables"),
  }
}

#[tokio::test]
async fn create_is_idempotent_and_keeps_rows() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("ghg.db");

  let first = SqliteStore::create(&path).await.unwrap();
  first
    .load(Batch::Facility(vec![facility(5, 2021, "TX")]))
    .await
    .unwrap();
  drop(first);

  SqliteStore::create(&path).await.unwrap();
  let reopened = SqliteStore::open(&path).await.unwrap();
  assert_eq!(reopened.count(Table::Facility).await.unwrap(), 1);
}

#[tokio::test]
async fn reopened_file_accepts_every_table() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("ghg.db");
  drop(SqliteStore::create(&path).await.unwrap());

  let s = SqliteStore::open(&path).await.unwrap();
  for _ in 0..2 {
    s.load(Batch::Facility(vec![facility(5, 2021, "TX")]))
      .await
      .unwrap();
  }
  s.load(Batch::Emissions(vec![emission(5, 1, 10.0, 2021)]))
    .await
    .unwrap();
  s.load(Batch::DSubpart(vec![DSubpart {
    facility_id:    5,
    facility_name:  None,
    ghg_name:       Some("Methane".into()),
    ghg_quantity:   Some(1.0),
    reporting_year: 2021,
  }]))
  .await
  .unwrap();

  assert_eq!(s.count(Table::Facility).await.unwrap(), 1);
  assert_eq!(s.count(Table::Emissions).await.unwrap(), 1);
  assert_eq!(s.count(Table::DSubpart).await.unwrap(), 1);
}
