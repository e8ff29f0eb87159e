//! Proof-of-work primitives: hashing, the difficulty predicate, the nonce
//! search, and the secondary integrity proof.
//!
//! The nonce search exists to make tampering computationally detectable,
//! not to coordinate untrusted parties — there is exactly one writer.  It
//! is CPU-bound with no inherent upper bound, so difficulty must stay small
//! and callers run it off any latency-sensitive path (and outside the
//! ledger's append lock).

use std::time::{Duration, Instant};

use sha2::{Digest, Sha256};

use acta_contracts::error::{LedgerError, LedgerResult};

use crate::canonical::{canonical_bytes, BlockContent};

/// SHA-256 of the canonical content at the given nonce, as lowercase hex.
pub fn block_digest(content: &BlockContent<'_>, nonce: u64) -> LedgerResult<String> {
    let bytes = canonical_bytes(content, nonce)?;
    let mut hasher = Sha256::new();
    hasher.update(&bytes);
    Ok(hex::encode(hasher.finalize()))
}

/// True when `hash` starts with `difficulty` hexadecimal zero characters.
pub fn meets_difficulty(hash: &str, difficulty: usize) -> bool {
    hash.len() >= difficulty && hash.bytes().take(difficulty).all(|b| b == b'0')
}

/// Search nonces from 0 upward until the digest meets the difficulty.
///
/// Returns the first satisfying `(nonce, hash)` pair — increasing-order
/// search makes the result the smallest such nonce, which verification can
/// rely on being stable.  Fully deterministic given `content` and
/// `difficulty`.
///
/// With `deadline` set, a search that runs past it fails with
/// `MiningTimeout`; with `None` the search is unbounded, which is only
/// acceptable at small difficulties.
pub fn mine(
    content: &BlockContent<'_>,
    difficulty: usize,
    deadline: Option<Duration>,
) -> LedgerResult<(u64, String)> {
    let started = Instant::now();
    let mut nonce: u64 = 0;

    loop {
        let digest = block_digest(content, nonce)?;
        if meets_difficulty(&digest, difficulty) {
            return Ok((nonce, digest));
        }

        if let Some(limit) = deadline {
            if started.elapsed() >= limit {
                return Err(LedgerError::MiningTimeout {
                    difficulty,
                    deadline_ms: limit.as_millis() as u64,
                });
            }
        }

        nonce += 1;
    }
}

/// The secondary integrity token: SHA-256 hex of
/// `block_hash ":" previous_hash`.
///
/// Derived from the finished hashes, independent of the nonce search — a
/// tamper check that holds even if the difficulty predicate is ever
/// reconfigured.
pub fn proof_of_integrity(block_hash: &str, previous_hash: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(block_hash.as_bytes());
    hasher.update(b":");
    hasher.update(previous_hash.as_bytes());
    hex::encode(hasher.finalize())
}
