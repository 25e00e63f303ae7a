//! Typed records for the four tables, and the mapping from upstream JSON.
//!
//! Every upstream object is mapped onto the record type of its table. Field
//! names are fixed; unknown fields reject the record instead of reaching the
//! storage layer. The key columns (`facility_id` and the year) are required,
//! everything else is nullable.

use serde::{Deserialize, de::DeserializeOwned};
use serde_json::Value;

use crate::{Error, Result, Table, coerce};

// ─── Records ─────────────────────────────────────────────────────────────────

/// One CO2-equivalent emission fact for a facility, gas and subpart.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Emission {
  #[serde(default, deserialize_with = "coerce::opt_real")]
  pub co2e_emission: Option<f64>,
  #[serde(deserialize_with = "coerce::int")]
  pub facility_id:   i64,
  #[serde(default, deserialize_with = "coerce::opt_int")]
  pub gas_id:        Option<i64>,
  #[serde(default, deserialize_with = "coerce::opt_int")]
  pub sub_part_id:   Option<i64>,
  #[serde(deserialize_with = "coerce::int")]
  pub year:          i64,
}

/// A reporting facility for one year.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Facility {
  #[serde(default, deserialize_with = "coerce::opt_text")]
  pub address1:                     Option<String>,
  #[serde(default, deserialize_with = "coerce::opt_text")]
  pub address2:                     Option<String>,
  #[serde(default, deserialize_with = "coerce::opt_text")]
  pub bamm_approved:                Option<String>,
  #[serde(default, deserialize_with = "coerce::opt_text")]
  pub bamm_used_desc:               Option<String>,
  #[serde(default, deserialize_with = "coerce::opt_text")]
  pub cems_used:                    Option<String>,
  #[serde(default, deserialize_with = "coerce::opt_text")]
  pub city:                         Option<String>,
  #[serde(default, deserialize_with = "coerce::opt_text")]
  pub co2_captured:                 Option<String>,
  #[serde(default, deserialize_with = "coerce::opt_text")]
  pub comments:                     Option<String>,
  #[serde(default, deserialize_with = "coerce::opt_text")]
  pub county:                       Option<String>,
  #[serde(default, deserialize_with = "coerce::opt_text")]
  pub county_fips:                  Option<String>,
  #[serde(default, deserialize_with = "coerce::opt_int")]
  pub eggrt_facility_id:            Option<i64>,
  #[serde(default, deserialize_with = "coerce::opt_text")]
  pub emission_classification_code: Option<String>,
  #[serde(default, deserialize_with = "coerce::opt_text")]
  pub emitted_co2_supplied:         Option<String>,
  #[serde(deserialize_with = "coerce::int")]
  pub facility_id:                  i64,
  #[serde(default, deserialize_with = "coerce::opt_text")]
  pub facility_name:                Option<String>,
  #[serde(default, deserialize_with = "coerce::opt_text")]
  pub facility_types:               Option<String>,
  #[serde(default, deserialize_with = "coerce::opt_text")]
  pub frs_id:                       Option<String>,
  #[serde(default, deserialize_with = "coerce::opt_real")]
  pub latitude:                     Option<f64>,
  #[serde(default, deserialize_with = "coerce::opt_real")]
  pub longitude:                    Option<f64>,
  #[serde(default, deserialize_with = "coerce::opt_text")]
  pub naics_code:                   Option<String>,
  #[serde(default, deserialize_with = "coerce::opt_text")]
  pub parent_company:               Option<String>,
  #[serde(default, deserialize_with = "coerce::opt_text")]
  pub process_stationary_cml:       Option<String>,
  #[serde(default, deserialize_with = "coerce::opt_text")]
  pub program_name:                 Option<String>,
  #[serde(default, deserialize_with = "coerce::opt_text")]
  pub program_sys_id:               Option<String>,
  #[serde(default, deserialize_with = "coerce::opt_text")]
  pub reported_industry_types:      Option<String>,
  #[serde(default, deserialize_with = "coerce::opt_text")]
  pub reported_subparts:            Option<String>,
  #[serde(default, deserialize_with = "coerce::opt_text")]
  pub reporting_status:             Option<String>,
  #[serde(default, deserialize_with = "coerce::opt_text")]
  pub rr_monitoring_plan:           Option<String>,
  #[serde(default, deserialize_with = "coerce::opt_text")]
  pub rr_monitoring_plan_filename:  Option<String>,
  #[serde(default, deserialize_with = "coerce::opt_text")]
  pub rr_mrv_plan_url:              Option<String>,
  #[serde(default, deserialize_with = "coerce::opt_text")]
  pub state:                        Option<String>,
  #[serde(default, deserialize_with = "coerce::opt_text")]
  pub state_name:                   Option<String>,
  #[serde(default, deserialize_with = "coerce::opt_int")]
  pub submission_id:                Option<i64>,
  #[serde(default, deserialize_with = "coerce::opt_text")]
  pub tribal_land_id:               Option<String>,
  #[serde(default, deserialize_with = "coerce::opt_text")]
  pub uu_rd_exempt:                 Option<String>,
  #[serde(deserialize_with = "coerce::int")]
  pub year:                         i64,
  #[serde(default, deserialize_with = "coerce::opt_text")]
  pub zip:                          Option<String>,
}

/// Subpart C (general stationary fuel combustion) quantity for one gas.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CSubpart {
  #[serde(deserialize_with = "coerce::int")]
  pub facility_id:    i64,
  #[serde(default, deserialize_with = "coerce::opt_text")]
  pub facility_name:  Option<String>,
  #[serde(default, deserialize_with = "coerce::opt_text")]
  pub ghg_gas_name:   Option<String>,
  #[serde(default, deserialize_with = "coerce::opt_real")]
  pub ghg_quantity:   Option<f64>,
  #[serde(deserialize_with = "coerce::int")]
  pub reporting_year: i64,
}

/// Subpart D (electricity generation) quantity for one gas.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DSubpart {
  #[serde(deserialize_with = "coerce::int")]
  pub facility_id:    i64,
  #[serde(default, deserialize_with = "coerce::opt_text")]
  pub facility_name:  Option<String>,
  #[serde(default, deserialize_with = "coerce::opt_text")]
  pub ghg_name:       Option<String>,
  #[serde(default, deserialize_with = "coerce::opt_real")]
  pub ghg_quantity:   Option<f64>,
  #[serde(deserialize_with = "coerce::int")]
  pub reporting_year: i64,
}

// ─── Batches ─────────────────────────────────────────────────────────────────

/// A homogeneous set of records bound for one table.
#[derive(Debug, Clone, PartialEq)]
pub enum Batch {
  Emissions(Vec<Emission>),
  Facility(Vec<Facility>),
  CSubpart(Vec<CSubpart>),
  DSubpart(Vec<DSubpart>),
}

impl Batch {
  pub fn empty(table: Table) -> Self {
    match table {
      Table::Emissions => Batch::Emissions(Vec::new()),
      Table::Facility => Batch::Facility(Vec::new()),
      Table::CSubpart => Batch::CSubpart(Vec::new()),
      Table::DSubpart => Batch::DSubpart(Vec::new()),
    }
  }

  pub fn table(&self) -> Table {
    match self {
      Batch::Emissions(_) => Table::Emissions,
      Batch::Facility(_) => Table::Facility,
      Batch::CSubpart(_) => Table::CSubpart,
      Batch::DSubpart(_) => Table::DSubpart,
    }
  }

  pub fn len(&self) -> usize {
    match self {
      Batch::Emissions(v) => v.len(),
      Batch::Facility(v) => v.len(),
      Batch::CSubpart(v) => v.len(),
      Batch::DSubpart(v) => v.len(),
    }
  }

  pub fn is_empty(&self) -> bool { self.len() == 0 }
}

/// An upstream record that could not be mapped onto its table's type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejected {
  /// Position of the record in the upstream array.
  pub index:  usize,
  pub reason: String,
}

/// The outcome of mapping one upstream array.
#[derive(Debug, Clone, PartialEq)]
pub struct Decoded {
  pub batch:    Batch,
  pub rejected: Vec<Rejected>,
}

fn decode_each<T: DeserializeOwned>(
  records: Vec<Value>,
  rejected: &mut Vec<Rejected>,
) -> Vec<T> {
  let mut out = Vec::with_capacity(records.len());
  for (index, value) in records.into_iter().enumerate() {
    match serde_json::from_value(value) {
      Ok(record) => out.push(record),
      Err(e) => rejected.push(Rejected { index, reason: e.to_string() }),
    }
  }
  out
}

/// Map upstream objects onto `table`'s record type. Records that fail to map
/// are collected in [`Decoded::rejected`]; the rest are kept in order.
pub fn decode(table: Table, records: Vec<Value>) -> Decoded {
  let mut rejected = Vec::new();
  let batch = match table {
    Table::Emissions => Batch::Emissions(decode_each(records, &mut rejected)),
    Table::Facility => Batch::Facility(decode_each(records, &mut rejected)),
    Table::CSubpart => Batch::CSubpart(decode_each(records, &mut rejected)),
    Table::DSubpart => Batch::DSubpart(decode_each(records, &mut rejected)),
  };
  Decoded { batch, rejected }
}

/// Parse a response body that must be a JSON array.
pub fn parse_array(body: &[u8]) -> Result<Vec<Value>> {
  match serde_json::from_slice(body)? {
    Value::Array(items) => Ok(items),
    other => Err(Error::NotAnArray(coerce::kind(&other))),
  }
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  #[test]
  fn facility_with_only_key_fields_and_name() {
    let decoded = decode(
      Table::Facility,
      vec![json!({"facility_id": 5, "year": 2021, "facility_name": "Acme"})],
    );
    assert!(decoded.rejected.is_empty());
    let Batch::Facility(rows) = decoded.batch else { panic!("wrong batch") };
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].facility_id, 5);
    assert_eq!(rows[0].year, 2021);
    assert_eq!(rows[0].facility_name.as_deref(), Some("Acme"));
    assert_eq!(rows[0].state, None);
  }

  #[test]
  fn emission_coerces_string_numbers() {
    let decoded = decode(
      Table::Emissions,
      vec![json!({
        "co2e_emission": "1234.5",
        "facility_id": "1000001",
        "gas_id": 1,
        "sub_part_id": null,
        "year": 2021
      })],
    );
    assert_eq!(
      decoded.batch,
      Batch::Emissions(vec![Emission {
        co2e_emission: Some(1234.5),
        facility_id:   1000001,
        gas_id:        Some(1),
        sub_part_id:   None,
        year:          2021,
      }])
    );
  }

  #[test]
  fn unknown_fields_and_missing_keys_are_rejected() {
    let decoded = decode(
      Table::CSubpart,
      vec![
        json!({"facility_id": 1, "reporting_year": 2020, "ghg_gas_name": "Methane"}),
        json!({"facility_id": 2, "reporting_year": 2020, "surprise": true}),
        json!({"reporting_year": 2020}),
        json!("not an object"),
      ],
    );
    assert_eq!(decoded.batch.len(), 1);
    let indices: Vec<_> = decoded.rejected.iter().map(|r| r.index).collect();
    assert_eq!(indices, vec![1, 2, 3]);
    assert!(decoded.rejected[0].reason.contains("surprise"));
  }

  #[test]
  fn subpart_d_uses_ghg_name() {
    let decoded = decode(
      Table::DSubpart,
      vec![json!({"facility_id": 7, "reporting_year": 2019, "ghg_name": "Nitrous Oxide", "ghg_quantity": 3})],
    );
    let Batch::DSubpart(rows) = decoded.batch else { panic!("wrong batch") };
    assert_eq!(rows[0].ghg_name.as_deref(), Some("Nitrous Oxide"));
    assert_eq!(rows[0].ghg_quantity, Some(3.0));
  }

  #[test]
  fn empty_array_decodes_to_empty_batch() {
    let decoded = decode(Table::Emissions, Vec::new());
    assert!(decoded.batch.is_empty());
    assert_eq!(decoded.batch.table(), Table::Emissions);
    assert!(decoded.rejected.is_empty());
  }

  #[test]
  fn parse_array_requires_an_array() {
    assert_eq!(parse_array(b"[]").unwrap().len(), 0);
    assert_eq!(parse_array(br#"[{"a":1},{"a":2}]"#).unwrap().len(), 2);
    assert!(matches!(parse_array(br#"{"error":"x"}"#), Err(Error::NotAnArray("object"))));
    assert!(matches!(parse_array(b"<html>"), Err(Error::Serialization(_))));
  }
}
