//! Convenient re-exports for downstream crates.

pub use crate::config::RunConfig;
pub use crate::error::{Error, Result};
pub use crate::token::{Token, TokenType};
pub use crate::types::{Batch, Row, Scalar};
