//! Client configuration, read once from the environment and then passed
//! explicitly into the client.

use booli_api::{Client, Credentials, DEFAULT_BASE_URL};
use thiserror::Error;

pub const ENV_API_KEY: &str = "BOOLI_API_KEY";
pub const ENV_CALLER_ID: &str = "BOOLI_CALLER_ID";
pub const ENV_QUERY: &str = "BOOLI_QUERY";
pub const ENV_BASE_URL: &str = "BOOLI_BASE_URL";

/// Search text used when neither the command line nor `BOOLI_QUERY` gives one.
pub const FALLBACK_QUERY: &str = "sverige";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("environment variable {0} is not set")]
    MissingVar(&'static str),
}

#[derive(Debug, Clone)]
pub struct BooliConfig {
    pub credentials: Credentials,
    /// Default search text from `BOOLI_QUERY`.
    pub default_query: Option<String>,
    pub base_url: String,
}

impl BooliConfig {
    pub fn new(api_key: impl Into<String>, caller_id: impl Into<String>) -> Self {
        Self {
            credentials: Credentials::new(api_key, caller_id),
            default_query: None,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Reads `BOOLI_API_KEY`, `BOOLI_CALLER_ID`, `BOOLI_QUERY` and `BOOLI_BASE_URL`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from any key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let api_key = get(ENV_API_KEY).ok_or(ConfigError::MissingVar(ENV_API_KEY))?;
        let caller_id = get(ENV_CALLER_ID).ok_or(ConfigError::MissingVar(ENV_CALLER_ID))?;
        Ok(Self {
            credentials: Credentials::new(api_key, caller_id),
            default_query: get(ENV_QUERY),
            base_url: get(ENV_BASE_URL).unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
        })
    }

    /// The search text to use when the caller gives none.
    pub fn query_or_default(&self) -> &str {
        self.default_query.as_deref().unwrap_or(FALLBACK_QUERY)
    }

    pub fn client(&self) -> Result<Client, booli_api::Error> {
        Client::with_base_url(&self.base_url, self.credentials.clone())
    }
}
