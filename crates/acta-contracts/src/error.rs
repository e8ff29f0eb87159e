//! Error taxonomy for the ACTA audit ledger.
//!
//! All fallible operations return `LedgerResult<T>`.  Note what is *not*
//! here: a block or chain found invalid during verification.  Invalid data
//! is a normal, reportable outcome (`ChainReport` with `is_valid: false`),
//! never an error.

use thiserror::Error;

/// The unified error type for the ACTA crates.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// The payload cannot be canonically serialized.  Rejected before
    /// mining starts; the caller can fix the payload and retry.
    #[error("payload cannot be canonically encoded: {reason}")]
    PayloadEncoding { reason: String },

    /// An append's declared previous-hash did not match the ledger's
    /// actual head.
    ///
    /// Surfacing this past the optimistic-retry path indicates a
    /// concurrency-control bug; it must not be blindly retried with the
    /// same candidate.
    #[error("chain conflict: head is {expected}, candidate declared {declared}")]
    ChainConflict { expected: String, declared: String },

    /// The persistence layer is unavailable or misbehaving.
    ///
    /// Reads may be retried by the caller with backoff.  Appends must not
    /// be retried automatically — a duplicate audit entry is itself a
    /// corruption of the record.
    #[error("storage error: {reason}")]
    Storage { reason: String },

    /// The nonce search exceeded its configured deadline.  No partial
    /// block is ever persisted.
    #[error("mining at difficulty {difficulty} exceeded deadline of {deadline_ms} ms")]
    MiningTimeout { difficulty: usize, deadline_ms: u64 },

    /// A required configuration value is missing or invalid.
    #[error("configuration error: {reason}")]
    Config { reason: String },
}

/// Convenience alias used throughout the ACTA crates.
pub type LedgerResult<T> = Result<T, LedgerError>;
