mod common;
pub use self::common::Query;

mod sold;
pub use self::sold::{SignedQuery, SoldQuery};
