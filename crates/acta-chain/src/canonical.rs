//! Canonical block encoding.
//!
//! The hash of a block is computed over a deterministic JSON rendering of
//! its fields.  Determinism is the load-bearing property: the exact same
//! bytes must be reproducible at mining time, at verification time, and
//! after a round trip through storage, or hash comparisons spuriously fail.
//!
//! The encoding is the compact JSON serialization of an object with exactly
//! these keys:
//!
//!   `action`, `actor_id`, `created_at`, `nonce`, `payload`,
//!   `previous_hash`, `subject_id`, `subject_type`
//!
//! serde_json's default object map is a `BTreeMap`, so keys are always
//! emitted in that lexicographic order with no whitespace.  `block_hash`
//! and `proof` never participate.  Two normalizations apply:
//!
//! - `created_at` renders as RFC 3339 UTC with microsecond precision and a
//!   `Z` suffix, so storage backends only need microsecond fidelity.
//! - An absent payload renders as `{}`.

use chrono::SecondsFormat;
use serde_json::json;

use acta_contracts::{
    block::{AuditBlock, CandidateBlock, Payload},
    error::{LedgerError, LedgerResult},
};

/// A borrowed view of the fields that participate in a block's hash.
///
/// Built from a not-yet-mined field set, from a `CandidateBlock`, or from a
/// stored `AuditBlock` — all three must canonicalize identically.
#[derive(Debug, Clone, Copy)]
pub struct BlockContent<'a> {
    pub previous_hash: &'a str,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub actor_id: i64,
    pub action: &'a str,
    pub subject_type: &'a str,
    pub subject_id: i64,
    pub payload: Option<&'a Payload>,
}

impl<'a> BlockContent<'a> {
    /// View a stored block's hashed fields, for verification.
    pub fn of_block(block: &'a AuditBlock) -> Self {
        Self {
            previous_hash: &block.previous_hash,
            created_at: block.created_at,
            actor_id: block.actor_id,
            action: &block.action,
            subject_type: &block.subject_type,
            subject_id: block.subject_id,
            payload: block.payload.as_ref(),
        }
    }

    /// View a candidate's hashed fields.
    pub fn of_candidate(candidate: &'a CandidateBlock) -> Self {
        Self {
            previous_hash: &candidate.previous_hash,
            created_at: candidate.created_at,
            actor_id: candidate.actor_id,
            action: &candidate.action,
            subject_type: &candidate.subject_type,
            subject_id: candidate.subject_id,
            payload: candidate.payload.as_ref(),
        }
    }
}

/// Serialize the canonical content for one `(content, nonce)` pair.
///
/// Deterministic: repeated calls — in the same process or after a restart —
/// produce byte-identical output for equal inputs.
pub fn canonical_bytes(content: &BlockContent<'_>, nonce: u64) -> LedgerResult<Vec<u8>> {
    let empty = Payload::new();
    let payload = content.payload.unwrap_or(&empty);

    let value = json!({
        "previous_hash": content.previous_hash,
        "created_at": content
            .created_at
            .to_rfc3339_opts(SecondsFormat::Micros, true),
        "action": content.action,
        "actor_id": content.actor_id,
        "subject_type": content.subject_type,
        "subject_id": content.subject_id,
        "payload": payload,
        "nonce": nonce,
    });

    serde_json::to_vec(&value).map_err(|e| LedgerError::PayloadEncoding {
        reason: e.to_string(),
    })
}
