//! Core types and trait definitions for the GHG ingest pipeline.
//!
//! This crate is free of HTTP and database dependencies. The fetch client,
//! the SQLite store and the pipeline all depend on it.

mod coerce;

pub mod error;
pub mod record;
pub mod report;
pub mod resource;
pub mod source;
pub mod store;
pub mod year;

pub use error::{Error, Result};
pub use resource::{RESOURCES, Resource, Table};
pub use year::{Year, YearError};
