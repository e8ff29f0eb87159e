//! Block and chain verification.
//!
//! Verification recomputes hashes from stored fields — it never re-runs the
//! nonce search, so checking a block is O(1) hash evaluations regardless of
//! difficulty.  Data found invalid is a normal, reportable outcome, not an
//! error: the only `Err` these functions can produce is a canonical
//! encoding failure.

use std::collections::BTreeSet;

use acta_contracts::{
    block::AuditBlock,
    error::LedgerResult,
    report::ChainReport,
};

use crate::{canonical::BlockContent, pow::block_digest};

/// Recompute a block's hash from its stored fields and stored nonce, and
/// compare to the stored `block_hash`.
///
/// Returns `Ok(false)` when any hashed field — action, payload, timestamp,
/// previous_hash, and the rest — has been altered since mining.
pub fn verify_block(block: &AuditBlock) -> LedgerResult<bool> {
    let recomputed = block_digest(&BlockContent::of_block(block), block.nonce)?;
    Ok(recomputed == block.block_hash)
}

/// Verify an ordered chain of blocks.
///
/// Two checks per block:
///
/// 1. hash correctness, via [`verify_block`];
/// 2. for every block but the first, prev-hash linkage: its declared
///    `previous_hash` must equal the actual `block_hash` of its immediate
///    predecessor in the given order.
///
/// A block failing either check lands in `compromised_block_hashes`; the
/// set keeps a block failing both from being reported twice.  An empty
/// chain is vacuously valid.
pub fn verify_chain(blocks: &[AuditBlock]) -> LedgerResult<ChainReport> {
    if blocks.is_empty() {
        return Ok(ChainReport::empty());
    }

    let mut compromised = BTreeSet::new();

    for (index, block) in blocks.iter().enumerate() {
        if !verify_block(block)? {
            compromised.insert(block.block_hash.clone());
        }

        if index > 0 && block.previous_hash != blocks[index - 1].block_hash {
            compromised.insert(block.block_hash.clone());
        }
    }

    Ok(ChainReport {
        is_valid: compromised.is_empty(),
        total_blocks: blocks.len() as u64,
        compromised_block_hashes: compromised,
    })
}
