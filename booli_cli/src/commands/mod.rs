//! CLI subcommand implementations.

pub mod page;
pub mod search;
pub mod sold;
