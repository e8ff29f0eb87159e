//! Ledger configuration.
//!
//! Loaded from TOML by the composition root and handed to the ledger by
//! value.  A SHA-256 digest rendered as hex has 64 characters, so
//! `difficulty` (the required count of leading zero characters) is capped
//! at 64.

use std::path::Path;

use serde::Deserialize;

use crate::error::{LedgerError, LedgerResult};

/// Tuning knobs for mining and append behavior.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LedgerConfig {
    /// Required count of leading hexadecimal zero characters in a block
    /// hash.  Expected mining work grows by 16x per unit; keep small.
    #[serde(default = "default_difficulty")]
    pub difficulty: usize,

    /// Optional cap on a single nonce search, in milliseconds.  When set,
    /// a search that exceeds it fails with `MiningTimeout` instead of
    /// running unbounded.  Unset by default: at the default difficulty the
    /// expected search is a handful of milliseconds.
    #[serde(default)]
    pub mining_deadline_ms: Option<u64>,
}

fn default_difficulty() -> usize {
    2
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            difficulty: default_difficulty(),
            mining_deadline_ms: None,
        }
    }
}

impl LedgerConfig {
    /// Parse a configuration from TOML text and validate it.
    pub fn from_toml_str(text: &str) -> LedgerResult<Self> {
        let config: Self = toml::from_str(text).map_err(|e| LedgerError::Config {
            reason: format!("invalid ledger config: {}", e),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a configuration file.
    pub fn from_file(path: &Path) -> LedgerResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| LedgerError::Config {
            reason: format!("cannot read {}: {}", path.display(), e),
        })?;
        Self::from_toml_str(&text)
    }

    fn validate(&self) -> LedgerResult<()> {
        if self.difficulty > 64 {
            return Err(LedgerError::Config {
                reason: format!(
                    "difficulty {} exceeds the 64 hex characters of a SHA-256 digest",
                    self.difficulty
                ),
            });
        }
        Ok(())
    }
}
