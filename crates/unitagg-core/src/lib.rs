#![forbid(unsafe_code)]
//! unitagg-core: row/scalar model, token model, and run configuration.
//!
//! Pure data. No IO, no logging, no parsing of quantities here; those live in
//! `unitagg-units` and `unitagg-operators`.

pub mod config;
pub mod error;
pub mod prelude;
pub mod token;
pub mod types;

/// Crate version, stamped into run reports.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
