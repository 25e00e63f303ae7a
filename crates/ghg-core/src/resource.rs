//! Upstream resources and the tables they land in.

use std::fmt;

use crate::Year;

// ─── Tables ──────────────────────────────────────────────────────────────────

/// One of the four tables in the local store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
  Emissions,
  Facility,
  CSubpart,
  DSubpart,
}

impl Table {
  pub const ALL: [Table; 4] =
    [Table::Emissions, Table::Facility, Table::CSubpart, Table::DSubpart];

  /// The SQL table name.
  pub fn name(self) -> &'static str {
    match self {
      Table::Emissions => "emissions",
      Table::Facility => "facility",
      Table::CSubpart => "c_subpart",
      Table::DSubpart => "d_subpart",
    }
  }
}

impl fmt::Display for Table {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.name()) }
}

// ─── Resources ───────────────────────────────────────────────────────────────

/// A fixed REST resource of the EPA data service, filtered by year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resource {
  /// Short human-readable name used in logs and errors.
  pub name:       &'static str,
  /// Path segment naming the upstream table, e.g. `ghg.pub_dim_facility`.
  pub path:       &'static str,
  /// Name of the column the upstream filters on. Not uniform across
  /// resources: `year` for facts and facilities, `reporting_year` for the
  /// subpart detail tables.
  pub year_field: &'static str,
  pub table:      Table,
}

/// All resources, in load order.
pub const RESOURCES: [Resource; 4] = [
  Resource {
    name:       "emissions",
    path:       "ghg.pub_facts_subp_ghg_emission",
    year_field: "year",
    table:      Table::Emissions,
  },
  Resource {
    name:       "facility",
    path:       "ghg.pub_dim_facility",
    year_field: "year",
    table:      Table::Facility,
  },
  Resource {
    name:       "c_subpart",
    path:       "ghg.c_subpart_level_information",
    year_field: "reporting_year",
    table:      Table::CSubpart,
  },
  Resource {
    name:       "d_subpart",
    path:       "ghg.d_subpart_level_information",
    year_field: "reporting_year",
    table:      Table::DSubpart,
  },
];

impl Resource {
  /// `{base}/{path}/{year_field}/equals/{year}`
  pub fn url(&self, base_url: &str, year: Year) -> String {
    format!(
      "{}/{}/{}/equals/{}",
      base_url.trim_end_matches('/'),
      self.path,
      self.year_field,
      year
    )
  }

  /// The resource that loads into `table`.
  pub fn for_table(table: Table) -> &'static Resource {
    match table {
      Table::Emissions => &RESOURCES[0],
      Table::Facility => &RESOURCES[1],
      Table::CSubpart => &RESOURCES[2],
      Table::DSubpart => &RESOURCES[3],
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn url_uses_per_resource_year_field() {
    let year = Year::new(2021).unwrap();
    let base = "https://data.epa.gov/dmapservice/";

    assert_eq!(
      Resource::for_table(Table::Emissions).url(base, year),
      "https://data.epa.gov/dmapservice/ghg.pub_facts_subp_ghg_emission/year/equals/2021"
    );
    assert_eq!(
      Resource::for_table(Table::DSubpart).url(base, year),
      "https://data.epa.gov/dmapservice/ghg.d_subpart_level_information/reporting_year/equals/2021"
    );
  }

  #[test]
  fn every_table_has_exactly_one_resource() {
    for table in Table::ALL {
      let matching = RESOURCES.iter().filter(|r| r.table == table).count();
      assert_eq!(matching, 1, "{table}");
      assert_eq!(Resource::for_table(table).table, table);
    }
  }
}
