//! # acta-store
//!
//! The in-memory reference implementation of the ACTA storage seam.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use acta_core::Ledger;
//! use acta_contracts::LedgerConfig;
//! use acta_store::InMemoryBlockStore;
//!
//! let ledger = Ledger::new(Arc::new(InMemoryBlockStore::new()), LedgerConfig::default());
//! ```
//!
//! This crate is also where the full append/verify path gets its
//! integration coverage — it is the one place that sees both the `Ledger`
//! and a concrete store.

pub mod memory;

pub use memory::InMemoryBlockStore;

// ── Tests ─────────────────────────────────────────────────────────────────────
