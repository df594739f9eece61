//! Error types for the library layer.

use std::fmt;

use crate::config::ConfigError;

/// Errors produced by the library layer, wrapping upstream API errors
/// and adding I/O, serialization, configuration and input validation failures.
#[derive(Debug)]
pub enum BooliError {
    /// An error from the underlying API client.
    Api(booli_api::Error),
    /// Writing harvested pages failed.
    Io(std::io::Error),
    /// JSON serialization failed.
    Serialization(serde_json::Error),
    /// Required configuration is missing.
    Config(ConfigError),
    /// User-provided input failed validation.
    InvalidInput(String),
}

impl fmt::Display for BooliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Api(e) => write!(f, "API error: {}", e),
            Self::Io(e) => write!(f, "I/O error: {}", e),
            Self::Serialization(e) => write!(f, "Serialization error: {}", e),
            Self::Config(e) => write!(f, "Configuration error: {}", e),
            Self::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
        }
    }
}

impl std::error::Error for BooliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Api(e) => Some(e),
            Self::Io(e) => Some(e),
            Self::Serialization(e) => Some(e),
            Self::Config(e) => Some(e),
            Self::InvalidInput(_) => None,
        }
    }
}

impl From<booli_api::Error> for BooliError {
    fn from(e: booli_api::Error) -> Self {
        Self::Api(e)
    }
}

impl From<std::io::Error> for BooliError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for BooliError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialization(e)
    }
}

impl From<ConfigError> for BooliError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}
