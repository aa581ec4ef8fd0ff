//! Run configuration that hosts can serialize/deserialize.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Maximum rows handed to a directive per invocation.
    pub batch_size: usize,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self { batch_size: 1024 }
    }
}

impl RunConfig {
    /// Defaults overridden by `UNITAGG_BATCH_SIZE` when it holds a positive integer.
    pub fn from_env() -> Self {
        let mut cfg = Self::default();

        if let Ok(s) = std::env::var("UNITAGG_BATCH_SIZE") {
            if let Ok(v) = s.trim().parse::<usize>() {
                if v > 0 {
                    cfg.batch_size = v;
                }
            }
        }

        cfg
    }

    pub fn from_json(value: &serde_json::Value) -> Result<Self> {
        let cfg: RunConfig = serde_json::from_value(value.clone())?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        if self.batch_size == 0 {
            return Err(Error::Config("batch_size must be greater than zero".into()));
        }
        Ok(())
    }
}
