//! Audit block types.
//!
//! `AuditBlock` is a single entry in the hash-linked ledger — the audited
//! fact (who did what to which entity) wrapped in the proof-of-work hash,
//! the link to its predecessor, and a secondary integrity proof.
//! `CandidateBlock` is the same record before the ledger has assigned it a
//! position in the chain.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The free-form structured details attached to an audited action.
///
/// Keys are field names, values arbitrary JSON.  serde_json's default map
/// is a `BTreeMap`, so serialization always emits keys in lexicographic
/// order — a property the canonical hashing encoding relies on.
pub type Payload = serde_json::Map<String, Value>;

/// One persisted entry in the audit ledger.
///
/// Every field except `sequence_id`, `block_hash`, and `proof` participates
/// in the hashed canonical content.  Modifying any of those fields after
/// persistence makes the stored `block_hash` unverifiable, which chain
/// verification detects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditBlock {
    /// Monotonically increasing position in the chain, assigned by the
    /// ledger at persistence time.  Starts at 0.  Immutable once assigned.
    pub sequence_id: u64,

    /// SHA-256 hash (lowercase hex) of this block's canonical content at
    /// the mined `nonce`.  Unique across the ledger.
    pub block_hash: String,

    /// The `block_hash` of the block with `sequence_id - 1`, or
    /// [`GENESIS_HASH`](AuditBlock::GENESIS_HASH) for the first block.
    pub previous_hash: String,

    /// Wall-clock time (UTC) captured before mining began.  Frozen once
    /// mining starts — it is part of the hashed content.
    pub created_at: DateTime<Utc>,

    /// Who performed the action.
    pub actor_id: i64,

    /// What was done, e.g. `"CREATE_TASK"`.
    pub action: String,

    /// The kind of entity acted upon, e.g. `"task"`.
    pub subject_type: String,

    /// Which entity of that kind.
    pub subject_id: i64,

    /// Optional structured details.  Hashes as `{}` when absent.
    pub payload: Option<Payload>,

    /// Secondary integrity token: SHA-256 hex of
    /// `block_hash ":" previous_hash`.  Derived after mining, independent
    /// of the nonce search.
    pub proof: String,

    /// The integer found by mining — the smallest value (searched from 0
    /// upward) at which the canonical content hashes under the difficulty
    /// target.
    pub nonce: u64,
}

impl AuditBlock {
    /// The sentinel `previous_hash` for the first block in the chain.
    ///
    /// 64 hex zeros — a value that can never be the SHA-256 of real data,
    /// making genesis detection unambiguous.
    pub const GENESIS_HASH: &'static str =
        "0000000000000000000000000000000000000000000000000000000000000000";
}

/// A fully mined block that has not yet been appended to the ledger.
///
/// Produced by the block builder.  Carries everything an `AuditBlock`
/// carries except `sequence_id`: storage order is the ledger's to assign,
/// and keeping the unsequenced state a separate type means no sentinel
/// values and no half-initialized blocks in circulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateBlock {
    pub block_hash: String,
    pub previous_hash: String,
    pub created_at: DateTime<Utc>,
    pub actor_id: i64,
    pub action: String,
    pub subject_type: String,
    pub subject_id: i64,
    pub payload: Option<Payload>,
    pub proof: String,
    pub nonce: u64,
}

impl CandidateBlock {
    /// Seal this candidate into an `AuditBlock` at the given chain position.
    pub fn into_block(self, sequence_id: u64) -> AuditBlock {
        AuditBlock {
            sequence_id,
            block_hash: self.block_hash,
            previous_hash: self.previous_hash,
            created_at: self.created_at,
            actor_id: self.actor_id,
            action: self.action,
            subject_type: self.subject_type,
            subject_id: self.subject_id,
            payload: self.payload,
            proof: self.proof,
            nonce: self.nonce,
        }
    }
}
