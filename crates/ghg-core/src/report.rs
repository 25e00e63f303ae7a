//! Read models for reporting over a populated store.

/// Total CO2e for one `(facility_id, year, gas_id)` group.
#[derive(Debug, Clone, PartialEq)]
pub struct GasTotal {
  pub facility_id:   i64,
  pub facility_name: Option<String>,
  pub year:          i64,
  pub gas_id:        Option<i64>,
  pub co2e_emission: f64,
}

/// Total CO2e for one region (facility state).
#[derive(Debug, Clone, PartialEq)]
pub struct StateTotal {
  /// `None` groups facilities that report no state.
  pub state:         Option<String>,
  pub facilities:    u64,
  pub co2e_emission: f64,
}

/// Facility count and location statistics.
#[derive(Debug, Clone, PartialEq)]
pub struct FacilitySummary {
  pub facilities: u64,
  pub latitude:   Option<Summary>,
  pub longitude:  Option<Summary>,
}

/// Descriptive statistics over a numeric column.
///
/// Quantiles interpolate linearly between closest ranks; `std` is the sample
/// standard deviation and is absent for fewer than two values.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
  pub count:  usize,
  pub mean:   f64,
  pub std:    Option<f64>,
  pub min:    f64,
  pub p25:    f64,
  pub median: f64,
  pub p75:    f64,
  pub max:    f64,
}

impl Summary {
  /// Summarise `values`, ignoring NaNs. Returns `None` when nothing is left.
  pub fn from_values(values: impl IntoIterator<Item = f64>) -> Option<Self> {
    let mut sorted: Vec<f64> = values.into_iter().filter(|v| !v.is_nan()).collect();
    if sorted.is_empty() {
      return None;
    }
    sorted.sort_by(f64::total_cmp);

    let count = sorted.len();
    let n = count as f64;
    let mean = sorted.iter().sum::<f64>() / n;
    let std = (count > 1).then(|| {
      let ss: f64 = sorted.iter().map(|v| (v - mean).powi(2)).sum();
      (ss / (n - 1.0)).sqrt()
    });

    Some(Self {
      count,
      mean,
      std,
      min: sorted[0],
      p25: quantile(&sorted, 0.25),
      median: quantile(&sorted, 0.5),
      p75: quantile(&sorted, 0.75),
      max: sorted[count - 1],
    })
  }
}

fn quantile(sorted: &[f64], q: f64) -> f64 {
  let pos = q * (sorted.len() - 1) as f64;
  let lo = pos.floor() as usize;
  let hi = pos.ceil() as usize;
  sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64)
}
