#![forbid(unsafe_code)]
//! unitagg: byte-size/time-duration quantities and the `aggregate-stats`
//! directive, re-exported from the workspace crates.

pub use unitagg_core;
pub use unitagg_exec;
pub use unitagg_operators;
pub use unitagg_units;

pub use unitagg_exec::{Engine, ExecError, RunReport};
pub use unitagg_units::{
    format_byte_size, format_time_duration, parse_byte_size, parse_time_duration,
};
