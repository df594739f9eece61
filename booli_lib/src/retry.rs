//! Bounded exponential backoff for failed page fetches.

use std::time::Duration;

use rand::Rng;

pub const ENV_RETRY_MAX: &str = "BOOLI_RETRY_MAX";
pub const ENV_RETRY_BASE_MS: &str = "BOOLI_RETRY_BASE_MS";
pub const ENV_RETRY_MAX_MS: &str = "BOOLI_RETRY_MAX_MS";

#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Retries after the first attempt. Zero disables retrying.
    pub max_retries: usize,
    pub base_delay: Duration,
    /// Cap applied before jitter.
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay: Duration::from_millis(2000),
            max_delay: Duration::from_millis(30000),
        }
    }
}

impl RetryPolicy {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            max_retries: env_parse(ENV_RETRY_MAX, defaults.max_retries),
            base_delay: Duration::from_millis(env_parse(
                ENV_RETRY_BASE_MS,
                defaults.base_delay.as_millis() as u64,
            )),
            max_delay: Duration::from_millis(env_parse(
                ENV_RETRY_MAX_MS,
                defaults.max_delay.as_millis() as u64,
            )),
        }
    }

    /// A policy that never retries.
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            ..Self::default()
        }
    }

    /// Delay before retry number `attempt` (1-based): `base * 2^(attempt-1)`,
    /// capped at `max_delay`, then scaled by a jitter in `[0.8, 1.2)`.
    pub fn delay_for_attempt(&self, attempt: usize) -> Duration {
        let shift = (attempt.saturating_sub(1)).min(30) as u32;
        let exp = 1u64 << shift;
        let base = (self.base_delay.as_millis() as u64)
            .saturating_mul(exp)
            .min(self.max_delay.as_millis() as u64);
        let jitter = rand::thread_rng().gen_range(0.8..1.2);
        Duration::from_millis((base as f64 * jitter) as u64)
    }
}

/// Transport failures, rate limiting and server errors are worth retrying.
/// Other client errors (bad signature, bad parameters) and unparseable bodies
/// are not.
pub fn is_retryable(err: &booli_api::Error) -> bool {
    match err {
        booli_api::Error::RequestFailed => true,
        booli_api::Error::HttpStatus { status, .. } => *status == 429 || *status >= 500,
        booli_api::Error::InvalidResponse(_) => false,
    }
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|val| val.parse::<T>().ok())
        .unwrap_or(default)
}
