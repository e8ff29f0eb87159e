//! Verification and statistics result types.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The outcome of a full-chain verification pass.
///
/// A block lands in `compromised_block_hashes` when its stored hash no
/// longer matches its recomputed canonical content, or when its declared
/// `previous_hash` disagrees with its actual predecessor.  A block failing
/// both checks still appears exactly once — the set makes reporting
/// idempotent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChainReport {
    /// True iff no block failed either check.  An empty chain is valid.
    pub is_valid: bool,

    /// Number of blocks examined.
    pub total_blocks: u64,

    /// The `block_hash` of every block that failed verification.
    pub compromised_block_hashes: BTreeSet<String>,
}

impl ChainReport {
    /// The report for an empty chain: vacuously valid.
    pub fn empty() -> Self {
        Self {
            is_valid: true,
            total_blocks: 0,
            compromised_block_hashes: BTreeSet::new(),
        }
    }
}

/// A point-in-time summary of the ledger.
///
/// `chain_valid` is computed by a full-chain verification pass, so
/// producing this is O(n) in ledger size.  Callers needing frequent stats
/// should cache or request on demand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerStats {
    /// Number of blocks in the ledger.
    pub total_blocks: u64,

    /// Result of the full-chain verification pass.
    pub chain_valid: bool,

    /// The difficulty in force for new blocks.
    pub difficulty: usize,

    /// `created_at` of the most recent block, or `None` when empty.
    pub last_block_time: Option<DateTime<Utc>>,
}
