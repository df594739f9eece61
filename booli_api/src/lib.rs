mod auth;
mod client;
mod errors;
mod query;
pub mod types;
pub use self::auth::{generate_nonce, Credentials, Signature, NONCE_LEN};
pub use self::client::{Client, DEFAULT_BASE_URL};
pub use self::errors::Error;
pub use self::query::{Query, SignedQuery, SoldQuery};
