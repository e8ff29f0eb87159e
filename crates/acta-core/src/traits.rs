//! The storage seam for the ACTA ledger.
//!
//! Dependency direction is deliberate: the ledger depends on this trait,
//! and concrete stores depend on the contract types — never the other way
//! around.  The ledger needs nothing more from persistence than ordered
//! append plus ordered scans by insertion sequence, by entity, or by actor.

use acta_contracts::{block::AuditBlock, error::LedgerResult};

/// Persistence for the append-only block sequence.
///
/// One logical table keyed by `sequence_id`, with lookups on `block_hash`
/// (unique), `actor_id`, and `(subject_type, subject_id)`.
///
/// Implementations map their own failures to `LedgerError::Storage`.  They
/// are NOT responsible for chain consistency — sequence assignment and the
/// previous-hash precondition are the ledger's job, enforced under its
/// append lock before `append_block` is called.
pub trait BlockStore: Send + Sync {
    /// Persist one block.  Append-only: a stored block is never mutated or
    /// deleted through this interface.
    fn append_block(&self, block: &AuditBlock) -> LedgerResult<()>;

    /// The block with the highest `sequence_id`, or `None` when empty.
    fn last_block(&self) -> LedgerResult<Option<AuditBlock>>;

    /// Number of blocks stored.
    fn block_count(&self) -> LedgerResult<u64>;

    /// Every block in ascending `sequence_id` order, read as one consistent
    /// snapshot — blocks appended while a long verification runs are simply
    /// not part of it.
    fn scan_chain(&self) -> LedgerResult<Vec<AuditBlock>>;

    /// Look up a block by its unique `block_hash`.
    fn find_by_hash(&self, block_hash: &str) -> LedgerResult<Option<AuditBlock>>;

    /// All blocks for one entity, most recent first.
    fn scan_by_subject(
        &self,
        subject_type: &str,
        subject_id: i64,
    ) -> LedgerResult<Vec<AuditBlock>>;

    /// Up to `limit` blocks for one actor, most recent first.
    fn scan_by_actor(&self, actor_id: i64, limit: usize) -> LedgerResult<Vec<AuditBlock>>;

    /// Up to `limit` blocks ledger-wide, most recent first.
    fn scan_recent(&self, limit: usize) -> LedgerResult<Vec<AuditBlock>>;
}
