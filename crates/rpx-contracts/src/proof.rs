//! The chain proof document.
//!
//! A `ChainProof` is the compact, serializable summary a chain verification
//! emits: what was present, what was found, and three spot-check samples.
//! It is built once per verification call and never mutated afterwards.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::evidence::{IntegrityStatus, TamperEvidence};

/// Immutable summary of one chain verification.
///
/// `genesis_hash` and `current_head` are the `record_hash` values at
/// positions 0 and N-1 of the *supplied* sequence. They report what is
/// present; `integrity_status` reports what is wrong. The two are
/// deliberately independent — a proof over a broken chain still names the
/// hashes it saw.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChainProof {
    /// Unique identifier for this proof document (`proof-<uuid>`).
    pub proof_id: String,

    /// Caller-supplied chain identifier, or `chain-<first record_id>`.
    pub chain_id: String,

    /// `record_hash` of the first supplied record.
    pub genesis_hash: String,

    /// `record_hash` of the last supplied record.
    pub current_head: String,

    /// Number of records in the supplied sequence.
    pub record_count: usize,

    /// Wall-clock time (UTC) the verification ran.
    pub verification_timestamp: DateTime<Utc>,

    /// The derived integrity classification.
    pub integrity_status: IntegrityStatus,

    /// Every violation discovered, in discovery order.
    pub tamper_evidence: Vec<TamperEvidence>,

    /// Spot-check samples: first, last (if more than one record), and the
    /// middle record (if more than two).
    pub sample_records: Vec<SampleRecord>,
}

/// A spot-check reference to one record in the verified sequence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SampleRecord {
    /// 0-based index in the supplied sequence.
    pub position: usize,

    /// The sampled record's identifier.
    pub record_id: String,

    /// The sampled record's timestamp, verbatim.
    pub timestamp: String,

    /// The sampled record's stored `record_hash`.
    pub record_hash: String,
}
