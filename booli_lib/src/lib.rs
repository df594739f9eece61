//! Library layer for the Booli harvester: configuration, input validation,
//! the pagination driver, retry policy and raw JSON output.
//!
//! Wraps the `booli_api` crate, which owns the wire format and request signing.

pub mod config;
pub mod error;
pub mod harvest;
pub mod output;
pub mod retry;
pub mod validation;

pub use booli_api;
pub use booli_api::types;
pub use booli_api::{Client, Credentials, SoldQuery};

pub use config::{BooliConfig, ConfigError};
pub use error::BooliError;
pub use harvest::{fetch_page, harvest, HarvestSummary, PageSink};
pub use output::{raw_file_name, OutputFormat, RawPageWriter};
pub use retry::RetryPolicy;
