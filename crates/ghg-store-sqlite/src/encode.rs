//! Mapping between typed records and SQLite rows.
//!
//! Each record type knows its table, its column list in declaration order,
//! and how to turn itself into bound values for that list.

use ghg_core::{
  Table,
  record::{CSubpart, DSubpart, Emission, Facility},
};
use rusqlite::types::Value;

/// A record that can be written as one row of its table.
pub trait Row: Send + 'static {
  const TABLE: Table;
  const COLUMNS: &'static [&'static str];

  /// Values for [`Row::COLUMNS`], in the same order.
  fn values(&self) -> Vec<Value>;
}

/// `INSERT OR REPLACE INTO table (c1, c2, ..) VALUES (?1, ?2, ..)`
pub fn insert_sql<R: Row>() -> String {
  let placeholders: Vec<String> =
    (1..=R::COLUMNS.len()).map(|i| format!("?{i}")).collect();
  format!(
    "INSERT OR REPLACE INTO {} ({}) VALUES ({})",
    R::TABLE.name(),
    R::COLUMNS.join(", "),
    placeholders.join(", ")
  )
}

// ─── Scalars ─────────────────────────────────────────────────────────────────

fn int(v: Option<i64>) -> Value { v.map_or(Value::Null, Value::Integer) }

fn real(v: Option<f64>) -> Value { v.map_or(Value::Null, Value::Real) }

fn text(v: &Option<String>) -> Value {
  v.as_ref().map_or(Value::Null, |s| Value::Text(s.clone()))
}

// ─── Records ─────────────────────────────────────────────────────────────────

impl Row for Emission {
  const TABLE: Table = Table::Emissions;
  const COLUMNS: &'static [&'static str] =
    &["co2e_emission", "facility_id", "gas_id", "sub_part_id", "year"];

  fn values(&self) -> Vec<Value> {
    vec![
      real(self.co2e_emission),
      Value::Integer(self.facility_id),
      int(self.gas_id),
      int(self.sub_part_id),
      Value::Integer(self.year),
    ]
  }
}

impl Row for Facility {
  const TABLE: Table = Table::Facility;
  const COLUMNS: &'static [&'static str] = &[
    "address1",
    "address2",
    "bamm_approved",
    "bamm_used_desc",
    "cems_used",
    "city",
    "co2_captured",
    "comments",
    "county",
    "county_fips",
    "eggrt_facility_id",
    "emission_classification_code",
    "emitted_co2_supplied",
    "facility_id",
    "facility_name",
    "facility_types",
    "frs_id",
    "latitude",
    "longitude",
    "naics_code",
    "parent_company",
    "process_stationary_cml",
    "program_name",
    "program_sys_id",
    "reported_industry_types",
    "reported_subparts",
    "reporting_status",
    "rr_monitoring_plan",
    "rr_monitoring_plan_filename",
    "rr_mrv_plan_url",
    "state",
    "state_name",
    "submission_id",
    "tribal_land_id",
    "uu_rd_exempt",
    "year",
    "zip",
  ];

  fn values(&self) -> Vec<Value> {
    vec![
      text(&self.address1),
      text(&self.address2),
      text(&self.bamm_approved),
      text(&self.bamm_used_desc),
      text(&self.cems_used),
      text(&self.city),
      text(&self.co2_captured),
      text(&self.comments),
      text(&self.county),
      text(&self.county_fips),
      int(self.eggrt_facility_id),
      text(&self.emission_classification_code),
      text(&self.emitted_co2_supplied),
      Value::Integer(self.facility_id),
      text(&self.facility_name),
      text(&self.facility_types),
      text(&self.frs_id),
      real(self.latitude),
      real(self.longitude),
      text(&self.naics_code),
      text(&self.parent_company),
      text(&self.process_stationary_cml),
      text(&self.program_name),
      text(&self.program_sys_id),
      text(&self.reported_industry_types),
      text(&self.reported_subparts),
      text(&self.reporting_status),
      text(&self.rr_monitoring_plan),
      text(&self.rr_monitoring_plan_filename),
      text(&self.rr_mrv_plan_url),
      text(&self.state),
      text(&self.state_name),
      int(self.submission_id),
      text(&self.tribal_land_id),
      text(&self.uu_rd_exempt),
      Value::Integer(self.year),
      text(&self.zip),
    ]
  }
}

impl Row for CSubpart {
  const TABLE: Table = Table::CSubpart;
  const COLUMNS: &'static [&'static str] =
    &["facility_id", "facility_name", "ghg_gas_name", "ghg_quantity", "reporting_year"];

  fn values(&self) -> Vec<Value> {
    vec![
      Value::Integer(self.facility_id),
      text(&self.facility_name),
      text(&self.ghg_gas_name),
      real(self.ghg_quantity),
      Value::Integer(self.reporting_year),
    ]
  }
}

impl Row for DSubpart {
  const TABLE: Table = Table::DSubpart;
  const COLUMNS: &'static [&'static str] =
    &["facility_id", "facility_name", "ghg_name", "ghg_quantity", "reporting_year"];

  fn values(&self) -> Vec<Value> {
    vec![
      Value::Integer(self.facility_id),
      text(&self.facility_name),
      text(&self.ghg_name),
      real(self.ghg_quantity),
      Value::Integer(self.reporting_year),
    ]
  }
}
