//! Chain verification: individual validity, genesis linkage, continuity,
//! and temporal monotonicity.
//!
//! The scan runs in a fixed order and never stops early — every anomaly in
//! the whole chain is collected before the final status is derived:
//!
//! 1. Per-record pass (schema + hash, via [`RecordVerifier`])
//! 2. Genesis check on record 0
//! 3. Continuity and timestamp checks for each adjacent pair, in index
//!    order; the two checks are independent, so one index can produce both
//!    kinds of evidence
//!
//! Status derivation is a pure function over the collected evidence — see
//! [`derive_status`] for the decision table.

use chrono::{DateTime, FixedOffset};
use tracing::{debug, warn};
use uuid::Uuid;

use rpx_canonical::{is_genesis_hash, GENESIS_HASH};
use rpx_contracts::{
    evidence::{IntegrityStatus, TamperEvidence, TamperKind},
    proof::{ChainProof, SampleRecord},
    record::RpxRecord,
};

use crate::record::{RecordVerdict, RecordVerifier};
use crate::traits::SchemaValidator;

/// The outcome of one chain verification call.
#[derive(Debug)]
pub struct ChainVerification {
    /// True iff `status` is `VALID`.
    pub valid: bool,

    /// The derived integrity classification.
    pub status: IntegrityStatus,

    /// Human-readable error lines, one per finding.
    pub errors: Vec<String>,

    /// The assembled proof. `None` only for an empty input sequence.
    pub proof: Option<ChainProof>,
}

/// Verifies an ordered record sequence as a hash-linked chain.
pub struct ChainVerifier {
    records: RecordVerifier,
}

impl ChainVerifier {
    /// Create a chain verifier whose per-record pass uses `validator` for
    /// structural conformance.
    pub fn new(validator: Box<dyn SchemaValidator>) -> Self {
        Self {
            records: RecordVerifier::new(validator),
        }
    }

    /// Verify `records` as an ordered chain.
    ///
    /// `chain_id` overrides the proof's chain identifier; when absent the
    /// identifier is derived from the first record.
    ///
    /// An empty sequence is terminal: `status = INCOMPLETE`, no proof, a
    /// single "chain is empty" error. For any non-empty sequence a proof is
    /// always assembled — it reports what is present even when the status
    /// reports what is wrong.
    pub fn verify(&self, records: &[RpxRecord], chain_id: Option<&str>) -> ChainVerification {
        if records.is_empty() {
            return ChainVerification {
                valid: false,
                status: IntegrityStatus::Incomplete,
                errors: vec!["chain is empty".to_string()],
                proof: None,
            };
        }

        debug!(record_count = records.len(), "verifying chain");

        let mut evidence: Vec<TamperEvidence> = Vec::new();
        let mut errors: Vec<String> = Vec::new();

        // ── Pass 1: per-record schema + hash checks ──────────────────────────
        for (position, record) in records.iter().enumerate() {
            match self.records.verify(record) {
                RecordVerdict::Valid { .. } => {}
                RecordVerdict::SchemaInvalid { violations } => {
                    let detail = violations
                        .iter()
                        .map(ToString::to_string)
                        .collect::<Vec<_>>()
                        .join("; ");
                    evidence.push(TamperEvidence {
                        record_id: record.record_id.clone(),
                        tampering_type: TamperKind::SchemaInvalid,
                        description: format!(
                            "record {position} failed schema validation: {detail}"
                        ),
                        position,
                    });
                    errors.push(format!(
                        "record {position} ({}): schema validation failed",
                        record.record_id
                    ));
                }
                RecordVerdict::HashMismatch {
                    stored, computed, ..
                } => {
                    evidence.push(TamperEvidence {
                        record_id: record.record_id.clone(),
                        tampering_type: TamperKind::HashMismatch,
                        description: format!(
                            "record {position} stored record_hash ({stored}) does not match \
                             recomputed hash ({computed})"
                        ),
                        position,
                    });
                    errors.push(format!(
                        "record {position} ({}): hash mismatch",
                        record.record_id
                    ));
                }
            }
        }

        // ── Pass 2: genesis linkage ──────────────────────────────────────────
        let genesis = &records[0];
        if !is_genesis_hash(&genesis.previous_hash) {
            evidence.push(TamperEvidence {
                record_id: genesis.record_id.clone(),
                tampering_type: TamperKind::BrokenLink,
                description: format!(
                    "Genesis record has invalid previous_hash: {} (expected: {})",
                    genesis.previous_hash, GENESIS_HASH
                ),
                position: 0,
            });
            errors.push("genesis record has invalid previous_hash".to_string());
        }

        // ── Pass 3: continuity and timestamp monotonicity ────────────────────
        for position in 1..records.len() {
            let current = &records[position];
            let previous = &records[position - 1];

            if current.previous_hash != previous.record_hash {
                evidence.push(TamperEvidence {
                    record_id: current.record_id.clone(),
                    tampering_type: TamperKind::BrokenLink,
                    description: format!(
                        "record {position} previous_hash ({}) does not match record {} hash ({})",
                        current.previous_hash,
                        position - 1,
                        previous.record_hash
                    ),
                    position,
                });
                errors.push(format!(
                    "broken chain link at position {position}: {}",
                    current.record_id
                ));
            }

            // A timestamp that does not parse was already flagged by the
            // per-record pass; no ordering can be established for it.
            if let (Some(current_ts), Some(previous_ts)) = (
                parse_timestamp(&current.timestamp),
                parse_timestamp(&previous.timestamp),
            ) {
                if current_ts < previous_ts {
                    evidence.push(TamperEvidence {
                        record_id: current.record_id.clone(),
                        tampering_type: TamperKind::TimestampViolation,
                        description: format!(
                            "record {position} timestamp ({}) is before record {} timestamp \
                             ({}), possible reordering",
                            current.timestamp,
                            position - 1,
                            previous.timestamp
                        ),
                        position,
                    });
                    errors.push(format!(
                        "timestamp violation at position {position}: {}",
                        current.record_id
                    ));
                }
            }
        }

        let status = derive_status(&evidence);
        for entry in &evidence {
            warn!(
                kind = %entry.tampering_type,
                position = entry.position,
                record_id = %entry.record_id,
                "tamper evidence"
            );
        }
        debug!(
            %status,
            evidence_count = evidence.len(),
            "chain verification complete"
        );

        let proof = build_proof(records, chain_id, status, evidence);

        ChainVerification {
            valid: status == IntegrityStatus::Valid,
            status,
            errors,
            proof: Some(proof),
        }
    }
}

/// Derive the integrity status from the collected tamper evidence.
///
/// Decision table:
///
/// | evidence set                                    | status     |
/// |-------------------------------------------------|------------|
/// | empty                                           | VALID      |
/// | contains a broken link past position 0          | INCOMPLETE |
/// | anything else (hash/schema/timestamp findings,  | INVALID    |
/// | or a genesis-only broken link)                  |            |
///
/// A broken link past position 0 can only come from the continuity pass,
/// which means the chain's shape itself cannot be established — records
/// are missing or reordered. The genesis check is the sole producer of a
/// broken link at position 0, so the distinction is structural rather than
/// inferred from description text.
pub fn derive_status(evidence: &[TamperEvidence]) -> IntegrityStatus {
    if evidence.is_empty() {
        return IntegrityStatus::Valid;
    }

    let continuity_break = evidence
        .iter()
        .any(|e| e.tampering_type == TamperKind::BrokenLink && e.position > 0);

    if continuity_break {
        IntegrityStatus::Incomplete
    } else {
        IntegrityStatus::Invalid
    }
}

/// Parse a record timestamp. Returns `None` when the value is not valid
/// RFC 3339 / ISO-8601.
fn parse_timestamp(raw: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(raw).ok()
}

/// Assemble the proof for a non-empty record sequence.
///
/// The proof reports the sequence as supplied: `genesis_hash` and
/// `current_head` are the stored hashes at positions 0 and N-1, whether or
/// not they check out against genesis or continuity.
fn build_proof(
    records: &[RpxRecord],
    chain_id: Option<&str>,
    status: IntegrityStatus,
    evidence: Vec<TamperEvidence>,
) -> ChainProof {
    let chain_id = chain_id
        .map(str::to_string)
        .unwrap_or_else(|| format!("chain-{}", records[0].record_id));

    let mut sample_records = vec![sample_at(records, 0)];
    if records.len() > 1 {
        sample_records.push(sample_at(records, records.len() - 1));
    }
    if records.len() > 2 {
        sample_records.push(sample_at(records, records.len() / 2));
    }

    ChainProof {
        proof_id: format!("proof-{}", Uuid::new_v4()),
        chain_id,
        genesis_hash: records[0].record_hash.clone(),
        current_head: records[records.len() - 1].record_hash.clone(),
        record_count: records.len(),
        verification_timestamp: chrono::Utc::now(),
        integrity_status: status,
        tamper_evidence: evidence,
        sample_records,
    }
}

fn sample_at(records: &[RpxRecord], position: usize) -> SampleRecord {
    let record = &records[position];
    SampleRecord {
        position,
        record_id: record.record_id.clone(),
        timestamp: record.timestamp.clone(),
        record_hash: record.record_hash.clone(),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
