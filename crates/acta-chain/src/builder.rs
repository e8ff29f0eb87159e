//! Block assembly.
//!
//! The builder turns an audited fact into a fully mined `CandidateBlock`.
//! Sequence assignment is deliberately not its job — storage order belongs
//! to the ledger.

use std::time::Duration;

use chrono::Utc;
use tracing::debug;

use acta_contracts::{
    block::{CandidateBlock, Payload},
    config::LedgerConfig,
    error::LedgerResult,
};

use crate::{
    canonical::BlockContent,
    pow::{mine, proof_of_integrity},
};

/// Assembles and mines candidate blocks at a fixed difficulty.
#[derive(Debug, Clone)]
pub struct BlockBuilder {
    difficulty: usize,
    deadline: Option<Duration>,
}

impl BlockBuilder {
    /// A builder with the given difficulty and no mining deadline.
    pub fn new(difficulty: usize) -> Self {
        Self {
            difficulty,
            deadline: None,
        }
    }

    /// A builder matching a ledger configuration.
    pub fn from_config(config: &LedgerConfig) -> Self {
        Self {
            difficulty: config.difficulty,
            deadline: config.mining_deadline_ms.map(Duration::from_millis),
        }
    }

    /// Cap each nonce search at `deadline`; exceeding it yields
    /// `MiningTimeout` and no block.
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn difficulty(&self) -> usize {
        self.difficulty
    }

    /// Assemble and mine one candidate block on top of `previous_hash`.
    ///
    /// `created_at` is captured first and frozen — it is part of the hashed
    /// content, so the timestamp reflects when the audited fact was
    /// recorded, not when mining finished.  Fails with `PayloadEncoding`
    /// if the payload cannot be canonically serialized (rejected before
    /// any mining work), or `MiningTimeout` if a configured deadline
    /// expires.
    pub fn build(
        &self,
        previous_hash: &str,
        actor_id: i64,
        action: &str,
        subject_type: &str,
        subject_id: i64,
        payload: Option<Payload>,
    ) -> LedgerResult<CandidateBlock> {
        let created_at = Utc::now();

        let content = BlockContent {
            previous_hash,
            created_at,
            actor_id,
            action,
            subject_type,
            subject_id,
            payload: payload.as_ref(),
        };

        let search_started = std::time::Instant::now();
        let (nonce, block_hash) = mine(&content, self.difficulty, self.deadline)?;
        debug!(
            nonce,
            elapsed_us = search_started.elapsed().as_micros() as u64,
            difficulty = self.difficulty,
            "mined candidate block"
        );

        let proof = proof_of_integrity(&block_hash, previous_hash);

        Ok(CandidateBlock {
            block_hash,
            previous_hash: previous_hash.to_string(),
            created_at,
            actor_id,
            action: action.to_string(),
            subject_type: subject_type.to_string(),
            subject_id,
            payload,
            proof,
            nonce,
        })
    }
}
