//! Request signing for the Booli API.
//!
//! Every call carries `callerId`, `time`, `unique` and `hash`, where `hash` is
//! the hex SHA-1 digest of `callerId + time + apiKey + unique`. A signature is
//! single-use; every request signs with a fresh nonce and the current clock.

use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

use rand::Rng;
use sha1::{Digest, Sha1};

/// Length of the `unique` nonce sent with every request.
pub const NONCE_LEN: usize = 16;

const NONCE_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// API key and caller ID issued by Booli. Immutable once constructed.
#[derive(Clone)]
pub struct Credentials {
    api_key: String,
    caller_id: String,
}

impl Credentials {
    pub fn new(api_key: impl Into<String>, caller_id: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            caller_id: caller_id.into(),
        }
    }

    pub fn caller_id(&self) -> &str {
        &self.caller_id
    }

    /// Signs with the current Unix time and a freshly generated nonce.
    pub fn sign(&self) -> Signature {
        self.sign_with(unix_now(), &generate_nonce())
    }

    /// Signs with an explicit timestamp and nonce.
    pub fn sign_with(&self, time: u64, unique: &str) -> Signature {
        let mut hasher = Sha1::new();
        hasher.update(self.caller_id.as_bytes());
        hasher.update(time.to_string().as_bytes());
        hasher.update(self.api_key.as_bytes());
        hasher.update(unique.as_bytes());

        Signature {
            caller_id: self.caller_id.clone(),
            time,
            unique: unique.to_string(),
            hash: hex::encode(hasher.finalize()),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &"<redacted>")
            .field("caller_id", &self.caller_id)
            .finish()
    }
}

/// The authentication parameters of one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    pub caller_id: String,
    /// Unix time in seconds.
    pub time: u64,
    /// Random nonce, `NONCE_LEN` characters of `A-Z0-9`.
    pub unique: String,
    /// Lowercase hex SHA-1, 40 characters.
    pub hash: String,
}

impl Signature {
    /// Wire parameters in the order the API documents them.
    pub fn query_pairs(&self) -> [(&'static str, String); 4] {
        [
            ("callerId", self.caller_id.clone()),
            ("time", self.time.to_string()),
            ("unique", self.unique.clone()),
            ("hash", self.hash.clone()),
        ]
    }
}

/// Draws `NONCE_LEN` characters uniformly from uppercase ASCII letters and digits.
pub fn generate_nonce() -> String {
    let mut rng = rand::thread_rng();
    (0..NONCE_LEN)
        .map(|_| NONCE_CHARSET[rng.gen_range(0..NONCE_CHARSET.len())] as char)
        .collect()
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}
