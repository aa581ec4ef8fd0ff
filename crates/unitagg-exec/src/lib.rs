#![forbid(unsafe_code)]
//! unitagg-exec: in-process run driver.
//!
//! Plays the host's part for a single directive: splits rows into batches,
//! owns the run-scoped store and metrics, signals the terminal phase, and
//! returns a `RunReport`. Not a scheduler; one run at a time, sequentially.

pub mod metrics;
pub mod runtime;

pub use runtime::{Engine, ExecError, RunReport};
