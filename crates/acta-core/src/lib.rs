//! # acta-core
//!
//! The ACTA ledger service and its abstract storage seam.
//!
//! This crate provides:
//! - The [`BlockStore`](traits::BlockStore) trait — the only thing the
//!   ledger asks of persistence
//! - The [`Ledger`](ledger::Ledger) service — linearized append, reads,
//!   and verification over any store
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use acta_core::Ledger;
//! use acta_contracts::LedgerConfig;
//!
//! let ledger = Ledger::new(Arc::new(store), LedgerConfig::default());
//! let block = ledger.record_action(7, "CREATE_TASK", "task", 42, None)?;
//! assert!(ledger.check_chain()?.is_valid);
//! ```

pub mod ledger;
pub mod traits;

pub use ledger::Ledger;
pub use traits::BlockStore;

// ── Tests ─────────────────────────────────────────────────────────────────────
