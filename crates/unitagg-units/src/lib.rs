#![forbid(unsafe_code)]
//! unitagg-units: byte-size and time-duration quantities.
//!
//! - `parse`/`format`: stateless text <-> canonical integer conversions
//!   (bytes, milliseconds). These are what per-row code should call.
//! - `quantity`/`token`: immutable value types that keep the originating
//!   literal and unit around, for grammar-level consumers.

pub mod error;
pub mod format;
pub mod parse;
pub mod quantity;
pub mod token;
pub mod unit;

pub use error::{ArgumentError, ParseError, QuantityKind};
pub use format::{
    format_byte_size, format_byte_size_in, format_time_duration, format_time_duration_in,
};
pub use parse::{parse_byte_size, parse_time_duration};
pub use quantity::{ByteSize, TimeDuration};
pub use token::{ByteSizeToken, TimeDurationToken};
pub use unit::{ByteUnit, TimeUnit};
