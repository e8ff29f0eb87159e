//! ACTA audit ledger — Demo CLI
//!
//! Runs one or all of three scenarios against a fresh in-memory ledger:
//! the normal record/verify lifecycle, tamper detection, and many writers
//! contending for the append path.
//!
//! Usage:
//!   cargo run -p demo -- run-all
//!   cargo run -p demo -- lifecycle
//!   cargo run -p demo -- tamper
//!   cargo run -p demo -- contention

use std::sync::Arc;
use std::thread;

use clap::{Parser, Subcommand};
use serde_json::json;
use tracing_subscriber::EnvFilter;

use acta_chain::verify_chain;
use acta_contracts::{error::LedgerResult, LedgerConfig};
use acta_core::Ledger;
use acta_store::InMemoryBlockStore;

// ── CLI definition ────────────────────────────────────────────────────────────

/// ACTA — tamper-evident audit ledger demo.
#[derive(Parser)]
#[command(
    name = "demo",
    about = "ACTA audit ledger demo",
    long_about = "Runs ACTA demo scenarios showing proof-of-work gated appends,\n\
                  block and chain verification, and tamper detection."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Leading zero hex characters required of every block hash.
    #[arg(long, default_value_t = 2)]
    difficulty: usize,
}

#[derive(Subcommand)]
enum Command {
    /// Run all three scenarios in sequence.
    RunAll,
    /// Scenario 1: record actions, verify each block and the whole chain.
    Lifecycle,
    /// Scenario 2: mutate a stored field and watch verification flag it.
    Tamper,
    /// Scenario 3: concurrent writers, one unbroken chain.
    Contention,
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    // Initialize structured logging.  Set RUST_LOG=debug to see mining and
    // append details.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();

    print_banner();

    let result = match cli.command {
        Command::RunAll => run_all(cli.difficulty),
        Command::Lifecycle => run_lifecycle(cli.difficulty),
        Command::Tamper => run_tamper(cli.difficulty),
        Command::Contention => run_contention(cli.difficulty),
    };

    match result {
        Ok(()) => println!("All selected scenarios completed."),
        Err(e) => {
            eprintln!("Demo error: {}", e);
            std::process::exit(1);
        }
    }
}

fn run_all(difficulty: usize) -> LedgerResult<()> {
    run_lifecycle(difficulty)?;
    run_tamper(difficulty)?;
    run_contention(difficulty)?;
    Ok(())
}

fn fresh_ledger(difficulty: usize) -> (Arc<InMemoryBlockStore>, Ledger) {
    let store = Arc::new(InMemoryBlockStore::new());
    let ledger = Ledger::new(
        store.clone(),
        LedgerConfig {
            difficulty,
            mining_deadline_ms: None,
        },
    );
    (store, ledger)
}

// ── Scenario 1: lifecycle ─────────────────────────────────────────────────────

fn run_lifecycle(difficulty: usize) -> LedgerResult<()> {
    println!("── Scenario 1: record / verify lifecycle ──");
    let (_, ledger) = fresh_ledger(difficulty);

    let payload = json!({ "title": "quarterly report", "priority": 3 })
        .as_object()
        .cloned();
    let created = ledger.record_action(7, "CREATE_TASK", "task", 42, payload)?;
    ledger.record_action(8, "ASSIGN_TASK", "task", 42, None)?;
    ledger.record_action(7, "CLOSE_TASK", "task", 42, None)?;

    for block in ledger.trail_for("task", 42)? {
        println!(
            "  #{} {} {:12} actor={} nonce={}",
            block.sequence_id,
            &block.block_hash[..12],
            block.action,
            block.actor_id,
            block.nonce
        );
    }

    println!(
        "  first block verifies: {}",
        ledger.check_block(&created.block_hash)?
    );

    let stats = ledger.stats()?;
    println!(
        "  chain valid: {}  blocks: {}  difficulty: {}",
        stats.chain_valid, stats.total_blocks, stats.difficulty
    );
    println!();
    Ok(())
}

// ── Scenario 2: tamper detection ──────────────────────────────────────────────

fn run_tamper(difficulty: usize) -> LedgerResult<()> {
    println!("── Scenario 2: tamper detection ──");
    let (store, ledger) = fresh_ledger(difficulty);

    ledger.record_action(7, "CREATE_TASK", "task", 42, None)?;
    ledger.record_action(9, "APPROVE_TASK", "task", 42, None)?;
    ledger.record_action(9, "EXPORT_REPORT", "report", 3, None)?;

    use acta_core::traits::BlockStore;
    let mut snapshot = store.scan_chain()?;
    println!("  pristine chain valid: {}", verify_chain(&snapshot)?.is_valid);

    // An attacker rewrites history in the storage snapshot.
    snapshot[1].action = "REJECT_TASK".to_string();

    let report = verify_chain(&snapshot)?;
    println!("  after mutating block 1: valid = {}", report.is_valid);
    for hash in &report.compromised_block_hashes {
        println!("  compromised: {}", hash);
    }
    println!();
    Ok(())
}

// ── Scenario 3: contention ────────────────────────────────────────────────────

fn run_contention(difficulty: usize) -> LedgerResult<()> {
    const WRITERS: usize = 8;
    const ACTIONS_EACH: usize = 5;

    println!("── Scenario 3: {} concurrent writers ──", WRITERS);
    let (_, ledger) = fresh_ledger(difficulty);
    let ledger = Arc::new(ledger);

    let handles: Vec<_> = (0..WRITERS)
        .map(|writer| {
            let ledger = ledger.clone();
            thread::spawn(move || -> LedgerResult<()> {
                for i in 0..ACTIONS_EACH {
                    ledger.record_action(
                        writer as i64,
                        "UPDATE_TASK",
                        "task",
                        i as i64,
                        None,
                    )?;
                }
                Ok(())
            })
        })
        .collect();
    for handle in handles {
        handle.join().expect("writer thread panicked")?;
    }

    let stats = ledger.stats()?;
    println!(
        "  blocks: {}  chain valid: {}",
        stats.total_blocks, stats.chain_valid
    );
    println!();
    Ok(())
}

// ── Banner ────────────────────────────────────────────────────────────────────

fn print_banner() {
    println!();
    println!("ACTA — Tamper-evident Audit Ledger");
    println!("==================================");
    println!();
    println!("Every audited action becomes a block:");
    println!("  [1] canonical content assembled (timestamp frozen first)");
    println!("  [2] nonce mined until the hash meets the difficulty target");
    println!("  [3] secondary proof derived from block + previous hash");
    println!("  [4] compare-and-append under the ledger's writer lock");
    println!("  [5] verification recomputes hashes — never re-mines");
    println!();
}
