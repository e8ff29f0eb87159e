//! # acta-chain
//!
//! Pure hash-chain primitives for the ACTA audit ledger: canonical block
//! encoding, the proof-of-work nonce search, block assembly, and
//! block/chain verification.
//!
//! Nothing in this crate performs I/O or touches shared state.  Persistence
//! and append ordering live in `acta-core` / `acta-store`.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use acta_chain::{BlockBuilder, verify_block, verify_chain};
//! use acta_contracts::AuditBlock;
//!
//! let builder = BlockBuilder::new(2);
//! let candidate = builder.build(
//!     AuditBlock::GENESIS_HASH, 7, "CREATE_TASK", "task", 42, None,
//! )?;
//! let block = candidate.into_block(0);
//! assert!(verify_block(&block)?);
//! ```

pub mod builder;
pub mod canonical;
pub mod pow;
pub mod verify;

pub use builder::BlockBuilder;
pub use canonical::{canonical_bytes, BlockContent};
pub use pow::{block_digest, meets_difficulty, mine, proof_of_integrity};
pub use verify::{verify_block, verify_chain};

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use chrono::{TimeZone, Utc};
    use serde_json::json;
    use sha2::{Digest, Sha256};

    use acta_contracts::{
        block::{AuditBlock, Payload},
        error::LedgerError,
    };

    use super::*;

    // ── Helpers ───────────────────────────────────────────────────────────────

    /// A fixed content view over owned fields, for deterministic hashing
    /// assertions.
    fn fixed_content(payload: Option<&Payload>) -> BlockContent<'_> {
        BlockContent {
            previous_hash: AuditBlock::GENESIS_HASH,
            created_at: Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 45).unwrap(),
            actor_id: 7,
            action: "CREATE_TASK",
            subject_type: "task",
            subject_id: 42,
            payload,
        }
    }

    /// Mine a linked chain of `n` blocks at difficulty 1.
    fn mined_chain(n: usize) -> Vec<AuditBlock> {
        let builder = BlockBuilder::new(1);
        let mut blocks: Vec<AuditBlock> = Vec::with_capacity(n);
        for i in 0..n {
            let previous_hash = blocks
                .last()
                .map(|b| b.block_hash.clone())
                .unwrap_or_else(|| AuditBlock::GENESIS_HASH.to_string());
            let candidate = builder
                .build(&previous_hash, 7, "UPDATE_TASK", "task", i as i64, None)
                .unwrap();
            blocks.push(candidate.into_block(i as u64));
        }
        blocks
    }

    // ── Canonical encoding ────────────────────────────────────────────────────

    #[test]
    fn canonical_bytes_are_deterministic() {
        let payload = json!({ "zeta": 1, "alpha": "two" })
            .as_object()
            .unwrap()
            .clone();
        let a = canonical_bytes(&fixed_content(Some(&payload)), 9).unwrap();
        let b = canonical_bytes(&fixed_content(Some(&payload)), 9).unwrap();
        assert_eq!(a, b, "same fields and nonce must encode byte-identically");
    }

    #[test]
    fn canonical_keys_are_lexicographically_ordered() {
        let bytes = canonical_bytes(&fixed_content(None), 0).unwrap();
        let text = String::from_utf8(bytes).unwrap();

        let positions: Vec<usize> = [
            "\"action\"",
            "\"actor_id\"",
            "\"created_at\"",
            "\"nonce\"",
            "\"payload\"",
            "\"previous_hash\"",
            "\"subject_id\"",
            "\"subject_type\"",
        ]
        .iter()
        .map(|key| text.find(key).expect("key missing from canonical form"))
        .collect();

        assert!(
            positions.windows(2).all(|w| w[0] < w[1]),
            "canonical keys out of order in: {}",
            text
        );
    }

    #[test]
    fn absent_payload_hashes_like_empty_map() {
        let empty = Payload::new();
        let without = block_digest(&fixed_content(None), 3).unwrap();
        let with_empty = block_digest(&fixed_content(Some(&empty)), 3).unwrap();
        assert_eq!(without, with_empty);
    }

    #[test]
    fn timestamp_renders_with_microsecond_z_suffix() {
        let bytes = canonical_bytes(&fixed_content(None), 0).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert!(
            text.contains("2024-03-01T12:30:45.000000Z"),
            "canonical form lacks the normalized timestamp: {}",
            text
        );
    }

    // ── Difficulty predicate ──────────────────────────────────────────────────

    #[test]
    fn meets_difficulty_counts_leading_zero_characters() {
        assert!(meets_difficulty("00ab", 2));
        assert!(meets_difficulty("000b", 3));
        assert!(!meets_difficulty("0ab0", 2));
        assert!(meets_difficulty("ffff", 0));
        assert!(!meets_difficulty("0", 2));
    }

    // ── Mining ────────────────────────────────────────────────────────────────

    #[test]
    fn mined_nonce_satisfies_difficulty_and_is_minimal() {
        let content = fixed_content(None);
        let (nonce, hash) = mine(&content, 2, None).unwrap();

        assert!(hash.starts_with("00"), "mined hash must meet difficulty");
        assert_eq!(hash, block_digest(&content, nonce).unwrap());

        // Increasing-order search: no smaller nonce may also satisfy.
        for earlier in 0..nonce {
            let digest = block_digest(&content, earlier).unwrap();
            assert!(
                !meets_difficulty(&digest, 2),
                "nonce {} already met the target before {}",
                earlier,
                nonce
            );
        }
    }

    #[test]
    fn mining_is_reproducible() {
        let content = fixed_content(None);
        let first = mine(&content, 2, None).unwrap();
        let second = mine(&content, 2, None).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn mining_past_deadline_reports_timeout() {
        // Difficulty 64 is unreachable; a zero deadline trips on the first
        // failed nonce.
        let err = mine(&fixed_content(None), 64, Some(Duration::ZERO)).unwrap_err();
        assert!(matches!(
            err,
            LedgerError::MiningTimeout {
                difficulty: 64,
                deadline_ms: 0
            }
        ));
    }

    // ── Proof of integrity ────────────────────────────────────────────────────

    #[test]
    fn proof_hashes_block_and_previous_separated_by_colon() {
        let block_hash = "00aa".repeat(16);
        let previous_hash = AuditBlock::GENESIS_HASH;

        let mut hasher = Sha256::new();
        hasher.update(format!("{}:{}", block_hash, previous_hash).as_bytes());
        let expected = hex::encode(hasher.finalize());

        assert_eq!(proof_of_integrity(&block_hash, previous_hash), expected);
    }

    // ── Builder ───────────────────────────────────────────────────────────────

    #[test]
    fn built_candidate_is_fully_populated_and_verifiable() {
        let payload = json!({ "title": "quarterly report" })
            .as_object()
            .unwrap()
            .clone();
        let candidate = BlockBuilder::new(2)
            .build(
                AuditBlock::GENESIS_HASH,
                7,
                "CREATE_TASK",
                "task",
                42,
                Some(payload.clone()),
            )
            .unwrap();

        assert!(candidate.block_hash.starts_with("00"));
        assert_eq!(candidate.previous_hash, AuditBlock::GENESIS_HASH);
        assert_eq!(candidate.actor_id, 7);
        assert_eq!(candidate.action, "CREATE_TASK");
        assert_eq!(candidate.subject_type, "task");
        assert_eq!(candidate.subject_id, 42);
        assert_eq!(candidate.payload.as_ref(), Some(&payload));
        assert_eq!(
            candidate.proof,
            proof_of_integrity(&candidate.block_hash, &candidate.previous_hash)
        );

        let block = candidate.into_block(0);
        assert!(verify_block(&block).unwrap());
    }

    #[test]
    fn builder_from_config_picks_up_difficulty() {
        let config = acta_contracts::LedgerConfig {
            difficulty: 1,
            mining_deadline_ms: Some(10_000),
        };
        let candidate = BlockBuilder::from_config(&config)
            .build(AuditBlock::GENESIS_HASH, 1, "LOGIN", "session", 1, None)
            .unwrap();
        assert!(candidate.block_hash.starts_with('0'));
    }

    // ── Single-block verification ─────────────────────────────────────────────

    #[test]
    fn mutating_any_hashed_field_breaks_verification() {
        let pristine = mined_chain(1).remove(0);
        assert!(verify_block(&pristine).unwrap());

        let mutations: Vec<(&str, AuditBlock)> = vec![
            ("action", {
                let mut b = pristine.clone();
                b.action = "DELETE_TASK".to_string();
                b
            }),
            ("payload", {
                let mut b = pristine.clone();
                b.payload = Some(json!({ "x": 1 }).as_object().unwrap().clone());
                b
            }),
            ("created_at", {
                let mut b = pristine.clone();
                b.created_at = b.created_at + chrono::Duration::microseconds(1);
                b
            }),
            ("previous_hash", {
                let mut b = pristine.clone();
                b.previous_hash = "11".repeat(32);
                b
            }),
            ("actor_id", {
                let mut b = pristine.clone();
                b.actor_id += 1;
                b
            }),
            ("subject_type", {
                let mut b = pristine.clone();
                b.subject_type = "user".to_string();
                b
            }),
            ("subject_id", {
                let mut b = pristine.clone();
                b.subject_id += 1;
                b
            }),
            ("nonce", {
                let mut b = pristine.clone();
                b.nonce += 1;
                b
            }),
        ];

        for (field, tampered) in mutations {
            assert!(
                !verify_block(&tampered).unwrap(),
                "mutated {} went undetected",
                field
            );
        }
    }

    // ── Chain verification ────────────────────────────────────────────────────

    #[test]
    fn intact_chain_verifies() {
        let blocks = mined_chain(3);
        let report = verify_chain(&blocks).unwrap();
        assert!(report.is_valid);
        assert_eq!(report.total_blocks, 3);
        assert!(report.compromised_block_hashes.is_empty());
    }

    #[test]
    fn empty_chain_is_vacuously_valid() {
        let report = verify_chain(&[]).unwrap();
        assert!(report.is_valid);
        assert_eq!(report.total_blocks, 0);
        assert!(report.compromised_block_hashes.is_empty());
    }

    #[test]
    fn broken_link_flags_only_the_offending_block() {
        let mut blocks = mined_chain(3);
        blocks[1].previous_hash = "22".repeat(32);

        let report = verify_chain(&blocks).unwrap();
        assert!(!report.is_valid);
        assert_eq!(report.total_blocks, 3);
        // B1 fails both the hash check (previous_hash participates in the
        // hash) and the linkage check, yet appears exactly once.  B2 still
        // links to B1's *stored* hash, so it stays clean.
        assert_eq!(report.compromised_block_hashes.len(), 1);
        assert!(report
            .compromised_block_hashes
            .contains(&blocks[1].block_hash));
    }

    #[test]
    fn mutated_field_flags_only_the_mutated_block() {
        let mut blocks = mined_chain(3);
        blocks[0].action = "TAMPERED".to_string();

        let report = verify_chain(&blocks).unwrap();
        assert!(!report.is_valid);
        assert_eq!(report.compromised_block_hashes.len(), 1);
        assert!(report
            .compromised_block_hashes
            .contains(&blocks[0].block_hash));
    }
}
