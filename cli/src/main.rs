//! rpx-verify — independent integrity verification for RPX decision chains.
//!
//! Three subcommands map onto the engine's three operations:
//!
//!   rpx-verify record --in record.json
//!   rpx-verify chain  --in records.jsonl --out proof.json [--chain-id id]
//!   rpx-verify report --in records.jsonl --out report.json [--chain-id id]
//!
//! Exit codes form a three-way taxonomy rather than the usual binary:
//! 0 = VALID, 1 = INVALID (tampering evident), 2 = INCOMPLETE (chain
//! continuity cannot be established). Structural failures — unreadable
//! input, unparsable lines — exit 1.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use rpx_contracts::{
    error::{RpxError, RpxResult},
    evidence::{IntegrityStatus, TamperEvidence},
};
use rpx_engine::{ChainVerifier, RecordVerdict, RecordVerifier, ReportGenerator};
use rpx_schema::JsonSchemaValidator;

mod io;

// ── Exit codes ────────────────────────────────────────────────────────────────

const EXIT_VALID: i32 = 0;
const EXIT_INVALID: i32 = 1;
const EXIT_INCOMPLETE: i32 = 2;

fn exit_code_for(status: IntegrityStatus) -> i32 {
    match status {
        IntegrityStatus::Valid => EXIT_VALID,
        IntegrityStatus::Invalid => EXIT_INVALID,
        IntegrityStatus::Incomplete => EXIT_INCOMPLETE,
    }
}

// ── CLI definition ────────────────────────────────────────────────────────────

/// Independent verification tool for RPX decision chains.
///
/// Recomputes canonical record hashes, checks genesis linkage, chain
/// continuity, and timestamp ordering, and emits proof and report
/// documents suitable as audit evidence.
#[derive(Parser)]
#[command(
    name = "rpx-verify",
    about = "Independent integrity verification for RPX decision chains",
    long_about = "Verifies append-only, hash-linked RPX decision logs:\n\
                  canonical record hashing, genesis linkage, chain continuity,\n\
                  timestamp ordering, tamper-evidence classification, and\n\
                  compliance reporting."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Verify a single RPX record (schema + hash integrity).
    Record {
        /// Input JSON file containing one RPX record.
        #[arg(long = "in", short = 'i', value_name = "FILE")]
        input: PathBuf,
    },
    /// Verify chain integrity and emit a chain-proof document.
    Chain {
        /// Input JSONL file containing RPX records, one per line.
        #[arg(long = "in", short = 'i', value_name = "FILE")]
        input: PathBuf,
        /// Output file for the chain-proof document.
        #[arg(long = "out", short = 'o', value_name = "FILE")]
        output: PathBuf,
        /// Chain identifier to stamp into the proof.
        #[arg(long = "chain-id", value_name = "ID")]
        chain_id: Option<String>,
    },
    /// Generate a full verification report with compliance assessment.
    Report {
        /// Input JSONL file containing RPX records, one per line.
        #[arg(long = "in", short = 'i', value_name = "FILE")]
        input: PathBuf,
        /// Output file for the verification-report document.
        #[arg(long = "out", short = 'o', value_name = "FILE")]
        output: PathBuf,
        /// Chain identifier to stamp into the report.
        #[arg(long = "chain-id", value_name = "ID")]
        chain_id: Option<String>,
    },
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    // Structured logging. Set RUST_LOG=debug for verbose output.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Command::Record { input } => run_record(&input),
        Command::Chain {
            input,
            output,
            chain_id,
        } => run_chain(&input, &output, chain_id.as_deref()),
        Command::Report {
            input,
            output,
            chain_id,
        } => run_report(&input, &output, chain_id.as_deref()),
    };

    match result {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(EXIT_INVALID);
        }
    }
}

// ── Subcommands ───────────────────────────────────────────────────────────────

fn run_record(input: &Path) -> RpxResult<i32> {
    let record = io::read_record(input)?;
    let verifier = RecordVerifier::new(Box::new(JsonSchemaValidator::for_record()?));

    match verifier.verify(&record) {
        RecordVerdict::Valid { warnings } => {
            println!("record {} is VALID", record.record_id);
            if !warnings.is_empty() {
                println!("warnings:");
                for warning in &warnings {
                    println!("  - {warning}");
                }
            }
            Ok(EXIT_VALID)
        }
        verdict => {
            eprintln!("record {} is INVALID", record.record_id);
            eprintln!("errors:");
            for error in verdict.errors() {
                eprintln!("  - {error}");
            }
            Ok(EXIT_INVALID)
        }
    }
}

fn run_chain(input: &Path, output: &Path, chain_id: Option<&str>) -> RpxResult<i32> {
    let records = io::read_records_jsonl(input)?;
    println!("verifying chain with {} records...", records.len());

    let verifier = ChainVerifier::new(Box::new(JsonSchemaValidator::for_record()?));
    let result = verifier.verify(&records, chain_id);

    let Some(proof) = result.proof else {
        // Empty input: nothing to write, but the status still drives the
        // exit code.
        for error in &result.errors {
            eprintln!("error: {error}");
        }
        return Ok(exit_code_for(result.status));
    };

    io::write_document(output, &proof)?;
    println!("chain proof written to {}", output.display());
    println!();
    println!("status: {}", result.status);
    println!("records verified: {}", proof.record_count);
    println!("genesis hash: {}", proof.genesis_hash);
    println!("current head: {}", proof.current_head);
    print_evidence(&proof.tamper_evidence);

    match result.status {
        IntegrityStatus::Valid => println!("chain is VALID (no tampering detected)"),
        IntegrityStatus::Invalid => eprintln!("chain is INVALID (tampering detected)"),
        IntegrityStatus::Incomplete => {
            eprintln!("chain is INCOMPLETE (missing records or broken links)")
        }
    }
    Ok(exit_code_for(result.status))
}

fn run_report(input: &Path, output: &Path, chain_id: Option<&str>) -> RpxResult<i32> {
    let records = io::read_records_jsonl(input)?;
    println!("generating verification report for {} records...", records.len());

    let generator = ReportGenerator::new(Box::new(JsonSchemaValidator::for_record()?));
    let report = match generator.generate(&records, chain_id) {
        Ok(report) => report,
        Err(RpxError::EmptyChain) => {
            eprintln!("error: {}", RpxError::EmptyChain);
            return Ok(EXIT_INCOMPLETE);
        }
        Err(e) => return Err(e),
    };

    io::write_document(output, &report)?;
    println!("verification report written to {}", output.display());
    println!();
    println!("report id: {}", report.report_id);
    println!("chain id: {}", report.chain_id);
    println!("integrity status: {}", report.integrity_status);
    match &report.compliance_details.compliance_level {
        Some(level) => println!("compliance level: {level}"),
        None => println!("compliance level: none"),
    }

    let guarantees = &report.compliance_details.constitutional_guarantees;
    println!("constitutional guarantees:");
    print_guarantee("rpx records present", guarantees.rpx_records_present);
    print_guarantee("fail closed verified", guarantees.fail_closed_verified);
    print_guarantee(
        "human escalation available",
        guarantees.human_escalation_available,
    );
    print_guarantee("hash chain intact", guarantees.hash_chain_intact);
    print_guarantee("context captured", guarantees.context_captured);

    print_evidence(&report.tamper_evidence);
    println!("notes: {}", report.compliance_details.notes);

    Ok(exit_code_for(report.integrity_status))
}

// ── Output helpers ────────────────────────────────────────────────────────────

fn print_guarantee(name: &str, held: bool) {
    println!("  {name}: {}", if held { "yes" } else { "no" });
}

fn print_evidence(evidence: &[TamperEvidence]) {
    if evidence.is_empty() {
        return;
    }
    eprintln!("tamper evidence ({} issues):", evidence.len());
    for entry in evidence {
        eprintln!(
            "  - [{}] position {}: {}",
            entry.tampering_type, entry.position, entry.description
        );
    }
}
