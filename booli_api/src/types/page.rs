use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::property::SoldProperty;
use crate::Error;

/// One page of results from the `/sold` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SoldPage {
    /// Records in this page.
    pub count: u64,
    /// Records matching the search on the server.
    pub total_count: u64,
    #[serde(default)]
    pub sold: Vec<SoldProperty>,
    /// Remaining top-level keys (`limit`, `offset`, `searchParams`, ...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A `/sold` response body exactly as the server sent it.
///
/// Only `count` and `totalCount` are read up front. The listings stay
/// untyped until [`SoldResponse::page`] is called, so a record the typed
/// model cannot represent never fails the fetch.
#[derive(Debug, Clone, PartialEq)]
pub struct SoldResponse {
    count: u64,
    total_count: u64,
    body: Value,
}

impl SoldResponse {
    pub fn from_body(body: Value) -> Result<Self, Error> {
        let count = read_count(&body, "count")?;
        let total_count = read_count(&body, "totalCount")?;
        Ok(Self {
            count,
            total_count,
            body,
        })
    }

    /// Records in this page.
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Records matching the search on the server.
    pub fn total_count(&self) -> u64 {
        self.total_count
    }

    pub fn body(&self) -> &Value {
        &self.body
    }

    pub fn into_body(self) -> Value {
        self.body
    }

    /// Typed view of the body.
    pub fn page(&self) -> Result<SoldPage, Error> {
        SoldPage::deserialize(&self.body).map_err(|e| Error::InvalidResponse(e.to_string()))
    }
}

fn read_count(body: &Value, key: &str) -> Result<u64, Error> {
    body.get(key).and_then(Value::as_u64).ok_or_else(|| {
        Error::InvalidResponse(format!("missing or non-integer field `{}`", key))
    })
}
