//! Lenient field deserializers for upstream JSON.
//!
//! The upstream service is loose about scalar types: identifiers arrive as
//! numbers or numeric strings, codes as numbers or strings. These helpers
//! apply the same conversions SQLite column affinity would. Empty strings
//! count as absent for numeric columns.

use serde::{Deserialize, Deserializer, de::Error as _};
use serde_json::Value;

pub(crate) fn kind(value: &Value) -> &'static str {
  match value {
    Value::Null => "null",
    Value::Bool(_) => "boolean",
    Value::Number(_) => "number",
    Value::String(_) => "string",
    Value::Array(_) => "array",
    Value::Object(_) => "object",
  }
}

fn to_int(value: Value) -> Result<Option<i64>, String> {
  match value {
    Value::Null => Ok(None),
    Value::Number(n) => {
      if let Some(i) = n.as_i64() {
        return Ok(Some(i));
      }
      match n.as_f64() {
        Some(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => Ok(Some(f as i64)),
        _ => Err(format!("expected an integer, found {n}")),
      }
    }
    Value::String(s) if s.trim().is_empty() => Ok(None),
    Value::String(s) => s
      .trim()
      .parse()
      .map(Some)
      .map_err(|_| format!("expected an integer, found {s:?}")),
    other => Err(format!("expected an integer, found {}", kind(&other))),
  }
}

fn to_real(value: Value) -> Result<Option<f64>, String> {
  match value {
    Value::Null => Ok(None),
    Value::Number(n) => n
      .as_f64()
      .map(Some)
      .ok_or_else(|| format!("expected a number, found {n}")),
    Value::String(s) if s.trim().is_empty() => Ok(None),
    Value::String(s) => s
      .trim()
      .parse()
      .map(Some)
      .map_err(|_| format!("expected a number, found {s:?}")),
    other => Err(format!("expected a number, found {}", kind(&other))),
  }
}

fn to_text(value: Value) -> Result<Option<String>, String> {
  match value {
    Value::Null => Ok(None),
    Value::String(s) => Ok(Some(s)),
    Value::Number(n) => Ok(Some(n.to_string())),
    Value::Bool(b) => Ok(Some(b.to_string())),
    other => Err(format!("expected text, found {}", kind(&other))),
  }
}

pub fn opt_int<'de, D: Deserializer<'de>>(d: D) -> Result<Option<i64>, D::Error> {
  to_int(Value::deserialize(d)?).map_err(D::Error::custom)
}

pub fn int<'de, D: Deserializer<'de>>(d: D) -> Result<i64, D::Error> {
  opt_int(d)?.ok_or_else(|| D::Error::custom("expected an integer, found null"))
}

pub fn opt_real<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
  to_real(Value::deserialize(d)?).map_err(D::Error::custom)
}

pub fn opt_text<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
  to_text(Value::deserialize(d)?).map_err(D::Error::custom)
}
