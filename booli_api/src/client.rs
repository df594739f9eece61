//! HTTP client for the Booli API.

use std::time::Duration;

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use url::Url;

use crate::{
    auth::Credentials,
    query::{Query, SoldQuery},
    types::SoldResponse,
    Error,
};

/// Production API root.
pub const DEFAULT_BASE_URL: &str = "https://api.booli.se";

/// Request timeout for Booli API calls.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client for the Booli API.
///
/// Holds the caller's credentials and signs every request independently, so
/// no request ever reuses a nonce.
pub struct Client {
    http: reqwest::Client,
    /// Base URL for the API. Defaults to [`DEFAULT_BASE_URL`].
    base_api_url: String,
    credentials: Credentials,
}

impl Client {
    /// Creates a new client pointing at the production Booli API.
    pub fn new(credentials: Credentials) -> Result<Self, Error> {
        Self::with_base_url(DEFAULT_BASE_URL, credentials)
    }

    /// Creates a new client with a custom base URL. Used for testing with wiremock.
    pub fn with_base_url(base_url: &str, credentials: Credentials) -> Result<Self, Error> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| {
                tracing::error!("Failed to build HTTP client: {}", e);
                Error::RequestFailed
            })?;
        Ok(Self {
            http,
            base_api_url: base_url.trim_end_matches('/').to_string(),
            credentials,
        })
    }

    fn get_url(&self, path: &str, query: &impl Query) -> Result<Url, Error> {
        let url = Url::parse(format!("{}{}", &self.base_api_url, path).as_str()).map_err(|e| {
            tracing::error!("Invalid URL constructed: {}", e);
            Error::RequestFailed
        })?;
        Ok(query.add_to_url(&url))
    }

    async fn get<T, Q>(&self, path: &str, query: &Q) -> Result<T, Error>
    where
        T: DeserializeOwned,
        Q: Query,
    {
        let url = self.get_url(path, query)?;
        let resp = self
            .http
            .get(url)
            .header("accept", "application/json")
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to get resource: {}", e);
                Error::RequestFailed
            })?;

        let status = resp.status();
        let body = resp.text().await.map_err(|e| {
            tracing::error!("Failed to read response body: {}", e);
            Error::RequestFailed
        })?;

        if status != StatusCode::OK {
            let snippet = truncate_body(&body);
            tracing::error!("Request failed with status {}: {}", status, snippet);
            return Err(Error::HttpStatus {
                status: status.as_u16(),
                body: snippet,
            });
        }

        serde_json::from_str::<T>(&body).map_err(|e| {
            let snippet = truncate_body(&body);
            tracing::error!("Failed to parse resource: {} | body: {}", e, snippet);
            Error::InvalidResponse(e.to_string())
        })
    }

    /// Fetches one page of sold listings. Each call is signed with a fresh
    /// timestamp and nonce. The body is returned as sent; only its counts are
    /// checked here.
    pub async fn get_sold(&self, query: &SoldQuery) -> Result<SoldResponse, Error> {
        let signed = query.sign(&self.credentials);
        tracing::debug!(
            "GET /sold q={} offset={:?} limit={:?} unique={}",
            query.q,
            query.offset,
            query.limit,
            signed.signature.unique
        );
        let body = self.get::<serde_json::Value, _>("/sold", &signed).await?;
        SoldResponse::from_body(body).map_err(|e| {
            tracing::error!("Unexpected /sold response: {}", e);
            e
        })
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 2000;
    if body.len() <= MAX {
        body.to_string()
    } else {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...[truncated]", &body[..end])
    }
}
