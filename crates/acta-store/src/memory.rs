//! In-memory implementation of `BlockStore`.
//!
//! `InMemoryBlockStore` is the reference store: a `Vec` of blocks in
//! sequence order behind an `RwLock`.  Reads run fully in parallel;
//! `scan_chain` clones the vector under one read-lock acquisition, which is
//! exactly the consistent snapshot full-chain verification wants.
//!
//! The ledger holds the store behind `Arc<dyn BlockStore>`, so clones of
//! the `Arc` can be handed to readers on other threads without additional
//! synchronization.

use std::sync::RwLock;

use tracing::debug;

use acta_contracts::{
    block::AuditBlock,
    error::{LedgerError, LedgerResult},
};
use acta_core::traits::BlockStore;

/// An append-only block store backed by a `Vec`.
///
/// Position in the vector equals `sequence_id` — the ledger assigns
/// sequence numbers densely from 0, and this store is only ever written
/// through it.
#[derive(Default)]
pub struct InMemoryBlockStore {
    pub(crate) blocks: RwLock<Vec<AuditBlock>>,
}

impl InMemoryBlockStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> LedgerResult<std::sync::RwLockReadGuard<'_, Vec<AuditBlock>>> {
        self.blocks.read().map_err(|e| LedgerError::Storage {
            reason: format!("block store lock poisoned: {}", e),
        })
    }
}

impl BlockStore for InMemoryBlockStore {
    fn append_block(&self, block: &AuditBlock) -> LedgerResult<()> {
        let mut blocks = self.blocks.write().map_err(|e| LedgerError::Storage {
            reason: format!("block store lock poisoned: {}", e),
        })?;
        blocks.push(block.clone());
        debug!(
            sequence_id = block.sequence_id,
            block_hash = %block.block_hash,
            "block persisted in memory"
        );
        Ok(())
    }

    fn last_block(&self) -> LedgerResult<Option<AuditBlock>> {
        Ok(self.read()?.last().cloned())
    }

    fn block_count(&self) -> LedgerResult<u64> {
        Ok(self.read()?.len() as u64)
    }

    fn scan_chain(&self) -> LedgerResult<Vec<AuditBlock>> {
        Ok(self.read()?.clone())
    }

    fn find_by_hash(&self, block_hash: &str) -> LedgerResult<Option<AuditBlock>> {
        Ok(self
            .read()?
            .iter()
            .find(|b| b.block_hash == block_hash)
            .cloned())
    }

    fn scan_by_subject(
        &self,
        subject_type: &str,
        subject_id: i64,
    ) -> LedgerResult<Vec<AuditBlock>> {
        Ok(self
            .read()?
            .iter()
            .rev()
            .filter(|b| b.subject_type == subject_type && b.subject_id == subject_id)
            .cloned()
            .collect())
    }

    fn scan_by_actor(&self, actor_id: i64, limit: usize) -> LedgerResult<Vec<AuditBlock>> {
        Ok(self
            .read()?
            .iter()
            .rev()
            .filter(|b| b.actor_id == actor_id)
            .take(limit)
            .cloned()
            .collect())
    }

    fn scan_recent(&self, limit: usize) -> LedgerResult<Vec<AuditBlock>> {
        Ok(self.read()?.iter().rev().take(limit).cloned().collect())
    }
}
