//! The ledger service: the single writer authority over the block chain.
//!
//! `Ledger` wires the block builder, the verifier, and a `BlockStore`
//! behind one handle.  It is an explicit value — construct it at the
//! composition root and pass it to whatever needs it; there is no hidden
//! process-wide instance.
//!
//! ## Append ordering
//!
//! Appends are strictly linearized by an advisory mutex, but mining never
//! runs under it.  `record_action` mines against an optimistic snapshot of
//! the head hash, then compare-and-appends: the critical section is only
//! read head → check precondition → assign sequence → persist.  If another
//! writer advanced the head during mining, the stale candidate is discarded
//! and a fresh one is mined against the new head — a re-derivation, never a
//! blind resubmission.

use std::sync::{Arc, Mutex};

use tracing::{info, warn};

use acta_chain::{verify_block, verify_chain, BlockBuilder};
use acta_contracts::{
    block::{AuditBlock, CandidateBlock, Payload},
    config::LedgerConfig,
    error::{LedgerError, LedgerResult},
    report::{ChainReport, LedgerStats},
};

use crate::traits::BlockStore;

/// Upper bound on mine-then-append attempts in `record_action` before the
/// conflict is surfaced to the caller.
const MAX_APPEND_ATTEMPTS: u32 = 8;

/// The append-only, hash-linked audit ledger.
pub struct Ledger {
    store: Arc<dyn BlockStore>,
    builder: BlockBuilder,
    difficulty: usize,
    append_lock: Mutex<()>,
}

impl Ledger {
    /// Create a ledger over the given store.
    pub fn new(store: Arc<dyn BlockStore>, config: LedgerConfig) -> Self {
        let builder = BlockBuilder::from_config(&config);
        Self {
            store,
            builder,
            difficulty: config.difficulty,
            append_lock: Mutex::new(()),
        }
    }

    /// The `block_hash` of the current last block, or the genesis sentinel
    /// when the ledger is empty.
    pub fn head_hash(&self) -> LedgerResult<String> {
        Ok(self
            .store
            .last_block()?
            .map(|block| block.block_hash)
            .unwrap_or_else(|| AuditBlock::GENESIS_HASH.to_string()))
    }

    /// Append a mined candidate to the chain.
    ///
    /// The transactional critical section: under the append lock, the
    /// current head is read, the candidate's `previous_hash` is checked
    /// against it, the next `sequence_id` is assigned, and the block is
    /// persisted.  A mismatched precondition fails with `ChainConflict`
    /// and persists nothing.
    pub fn append(&self, candidate: CandidateBlock) -> LedgerResult<AuditBlock> {
        let _guard = self.append_lock.lock().map_err(|e| LedgerError::Storage {
            reason: format!("append lock poisoned: {}", e),
        })?;

        let head = self
            .store
            .last_block()?
            .map(|block| block.block_hash)
            .unwrap_or_else(|| AuditBlock::GENESIS_HASH.to_string());

        if candidate.previous_hash != head {
            return Err(LedgerError::ChainConflict {
                expected: head,
                declared: candidate.previous_hash,
            });
        }

        let sequence_id = self.store.block_count()?;
        let block = candidate.into_block(sequence_id);
        self.store.append_block(&block)?;

        info!(
            sequence_id,
            block_hash = %block.block_hash,
            actor_id = block.actor_id,
            action = %block.action,
            "audit block appended"
        );

        Ok(block)
    }

    /// Record one audited action as a new block.
    ///
    /// Mines outside the append lock against an optimistic head snapshot,
    /// then compare-and-appends.  On a head race the candidate is rebuilt
    /// from the new head and the attempt repeated, up to a small bound;
    /// exhausting it surfaces the final `ChainConflict`.
    pub fn record_action(
        &self,
        actor_id: i64,
        action: &str,
        subject_type: &str,
        subject_id: i64,
        payload: Option<Payload>,
    ) -> LedgerResult<AuditBlock> {
        let mut attempt = 0;
        loop {
            attempt += 1;

            let head = self.head_hash()?;
            let candidate = self.builder.build(
                &head,
                actor_id,
                action,
                subject_type,
                subject_id,
                payload.clone(),
            )?;

            match self.append(candidate) {
                Ok(block) => return Ok(block),
                Err(LedgerError::ChainConflict { .. }) if attempt < MAX_APPEND_ATTEMPTS => {
                    warn!(
                        attempt,
                        actor_id, action, "head advanced during mining; rebuilding candidate"
                    );
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Verify one stored block by hash.
    ///
    /// An unknown hash reports `false` — there is no valid block it could
    /// denote.  Verification recomputes the stored content's hash; it never
    /// re-runs mining.
    pub fn check_block(&self, block_hash: &str) -> LedgerResult<bool> {
        match self.store.find_by_hash(block_hash)? {
            Some(block) => verify_block(&block),
            None => Ok(false),
        }
    }

    /// Verify the entire chain over one consistent snapshot.
    ///
    /// O(n) in ledger size.  Runs concurrently with appends without locking
    /// them out: blocks appended after the snapshot simply are not part of
    /// the report.
    pub fn check_chain(&self) -> LedgerResult<ChainReport> {
        let blocks = self.store.scan_chain()?;
        verify_chain(&blocks)
    }

    /// The audit trail for one entity, most recent first.
    pub fn trail_for(
        &self,
        subject_type: &str,
        subject_id: i64,
    ) -> LedgerResult<Vec<AuditBlock>> {
        self.store.scan_by_subject(subject_type, subject_id)
    }

    /// Up to `limit` actions by one actor, most recent first.
    pub fn actions_by(&self, actor_id: i64, limit: usize) -> LedgerResult<Vec<AuditBlock>> {
        self.store.scan_by_actor(actor_id, limit)
    }

    /// Up to `limit` most recent blocks ledger-wide.
    pub fn recent(&self, limit: usize) -> LedgerResult<Vec<AuditBlock>> {
        self.store.scan_recent(limit)
    }

    /// Ledger statistics.
    ///
    /// `chain_valid` delegates to the full-chain check, so this call is
    /// O(n) in ledger size — a documented cost.  Callers needing frequent
    /// stats should cache.
    pub fn stats(&self) -> LedgerResult<LedgerStats> {
        let report = self.check_chain()?;
        let last_block_time = self.store.last_block()?.map(|block| block.created_at);

        Ok(LedgerStats {
            total_blocks: report.total_blocks,
            chain_valid: report.is_valid,
            difficulty: self.difficulty,
            last_block_time,
        })
    }
}
