//! Domain types and pure validation logic shared by the db and api crates.

pub mod error;
pub mod rule;
pub mod types;
