//! # acta-contracts
//!
//! Shared types, error taxonomy, and configuration for the ACTA
//! tamper-evident audit ledger.
//!
//! All crates in the workspace import from here.  No business logic lives
//! in this crate — only data definitions.

pub mod block;
pub mod config;
pub mod error;
pub mod report;

pub use block::{AuditBlock, CandidateBlock, Payload};
pub use config::LedgerConfig;
pub use error::{LedgerError, LedgerResult};
pub use report::{ChainReport, LedgerStats};
