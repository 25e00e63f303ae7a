//! Plain-text rendering of sync results and reports.

use std::fmt::Write as _;

use ghg_core::report::{FacilitySummary, GasTotal, StateTotal, Summary};
use ghg_sync::SyncReport;

/// Widest bar drawn by [`state_chart`].
const BAR_WIDTH: usize = 40;

pub fn sync_report(report: &SyncReport) -> String {
  let mut out = String::new();
  let _ = writeln!(out, "Synced reporting year {}", report.year);
  let _ = writeln!(out, "{:<10} {:>9} {:>9} {:>9}", "table", "fetched", "loaded", "rejected");
  for t in &report.tables {
    let _ = writeln!(
      out,
      "{:<10} {:>9} {:>9} {:>9}",
      t.table.name(),
      t.fetched,
      t.loaded,
      t.rejected
    );
  }
  let elapsed = report.finished_at - report.started_at;
  let _ = writeln!(out, "took {:.1}s", elapsed.num_milliseconds() as f64 / 1000.0);
  out
}

/// `describe()`-style block for one column.
pub fn summary(column: &str, summary: Option<&Summary>) -> String {
  let Some(s) = summary else {
    return format!("{column}: no values\n");
  };
  let std = s.std.map_or_else(|| "-".to_owned(), |v| format!("{v:.3}"));
  let mut out = format!("{column}\n");
  for (label, value) in [
    ("count", s.count.to_string()),
    ("mean", format!("{:.3}", s.mean)),
    ("std", std),
    ("min", format!("{:.3}", s.min)),
    ("25%", format!("{:.3}", s.p25)),
    ("50%", format!("{:.3}", s.median)),
    ("75%", format!("{:.3}", s.p75)),
    ("max", format!("{:.3}", s.max)),
  ] {
    let _ = writeln!(out, "  {label:<6}{value:>20}");
  }
  out
}

pub fn facility_summary(facilities: &FacilitySummary) -> String {
  let mut out = format!("facilities: {}\n", facilities.facilities);
  out.push_str(&summary("latitude", facilities.latitude.as_ref()));
  out.push_str(&summary("longitude", facilities.longitude.as_ref()));
  out
}

/// The `limit` largest groups, keeping the facility/year/gas key order among
/// them.
pub fn gas_totals(totals: &[GasTotal], limit: usize) -> String {
  let mut top: Vec<&GasTotal> = totals.iter().collect();
  top.sort_by(|a, b| b.co2e_emission.total_cmp(&a.co2e_emission));
  top.truncate(limit);
  top.sort_by_key(|t| (t.facility_id, t.year, t.gas_id));

  let mut out = String::new();
  let _ = writeln!(
    out,
    "{:>11} {:>5} {:>6} {:>16}  {}",
    "facility_id", "year", "gas_id", "co2e_emission", "facility_name"
  );
  for t in top {
    let gas = t.gas_id.map_or_else(|| "-".to_owned(), |g| g.to_string());
    let _ = writeln!(
      out,
      "{:>11} {:>5} {:>6} {:>16.1}  {}",
      t.facility_id,
      t.year,
      gas,
      t.co2e_emission,
      t.facility_name.as_deref().unwrap_or("")
    );
  }
  if totals.len() > limit {
    let _ = writeln!(out, "({} of {} groups shown)", limit, totals.len());
  }
  out
}

/// Horizontal bar chart of CO2e per state, scaled to the largest total.
pub fn state_chart(totals: &[StateTotal]) -> String {
  let max = totals
    .iter()
    .map(|t| t.co2e_emission)
    .fold(0.0_f64, f64::max);

  let mut out = String::new();
  for t in totals {
    let len = if max > 0.0 {
      ((t.co2e_emission / max) * BAR_WIDTH as f64).round() as usize
    } else {
      0
    };
    let _ = writeln!(
      out,
      "{:<4} {:<width$} {:>16.1} ({} facilities)",
      t.state.as_deref().unwrap_or("??"),
      "#".repeat(len),
      t.co2e_emission,
      t.facilities,
      width = BAR_WIDTH
    );
  }
  out
}
