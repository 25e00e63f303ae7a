//! Reporting year validation.
//!
//! The accepted range is fixed; how the value is obtained (flag, prompt) is
//! the caller's business.

use std::{fmt, str::FromStr};

use serde::Deserialize;
use thiserror::Error;

/// Earliest reporting year accepted.
pub const MIN_YEAR: i64 = 1970;
/// Latest reporting year accepted.
pub const MAX_YEAR: i64 = 2023;

/// Why a candidate year was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum YearError {
  #[error("please enter a valid year (got {0:?})")]
  NotANumber(String),

  #[error("please enter a year between 1970 and 2023 (got {0})")]
  OutOfRange(i64),
}

/// A reporting year known to lie in `MIN_YEAR..=MAX_YEAR`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(try_from = "i64")]
pub struct Year(i64);

impl Year {
  pub fn new(value: i64) -> Result<Self, YearError> {
    if (MIN_YEAR..=MAX_YEAR).contains(&value) {
      Ok(Self(value))
    } else {
      Err(YearError::OutOfRange(value))
    }
  }

  /// Parse user input. Surrounding whitespace is ignored.
  pub fn parse(input: &str) -> Result<Self, YearError> {
    let trimmed = input.trim();
    let value: i64 = trimmed
      .parse()
      .map_err(|_| YearError::NotANumber(trimmed.to_owned()))?;
    Self::new(value)
  }

  pub fn get(self) -> i64 { self.0 }
}

impl FromStr for Year {
  type Err = YearError;

  fn from_str(s: &str) -> Result<Self, Self::Err> { Self::parse(s) }
}

impl TryFrom<i64> for Year {
  type Error = YearError;

  fn try_from(value: i64) -> Result<Self, Self::Error> { Self::new(value) }
}

impl From<Year> for i64 {
  fn from(year: Year) -> Self { year.0 }
}

impl fmt::Display for Year {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { self.0.fmt(f) }
}
