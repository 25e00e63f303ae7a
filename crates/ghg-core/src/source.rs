//! The `RecordSource` trait: where upstream records come from.

use std::future::Future;

use serde_json::Value;

use crate::{Resource, Year};

/// Something that can produce the raw upstream records of a resource for a
/// year. The HTTP client in `ghg-fetch` is the production implementation.
pub trait RecordSource: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Fetch every record of `resource` for `year`. An empty vector is a
  /// valid answer.
  fn fetch<'a>(
    &'a self,
    resource: &'a Resource,
    year: Year,
  ) -> impl Future<Output = Result<Vec<Value>, Self::Error>> + Send + 'a;
}
