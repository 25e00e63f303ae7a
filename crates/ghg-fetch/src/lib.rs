//! HTTP client for the EPA greenhouse-gas data service.
//!
//! [`EpaClient`] implements [`ghg_core::source::RecordSource`]. Responses can
//! be cached on disk by request URL; see [`cache`].

pub mod cache;
pub mod client;
pub mod error;

pub use cache::{CacheMode, ResponseCache};
pub use client::{ClientConfig, DEFAULT_BASE_URL, EpaClient};
pub use error::{Error, Result};
