//! Tamper evidence and integrity status types.
//!
//! Verification never throws on a finding — every violation becomes one
//! `TamperEvidence` entry and the scan continues, so auditors always see
//! the complete picture for the whole chain.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The cause of one detected integrity violation.
///
/// The tag is assigned at the point of detection, never inferred later from
/// description text. `HashMismatch` and `SchemaInvalid` are distinct
/// categories even though both come out of the per-record pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TamperKind {
    /// The stored `record_hash` disagrees with the recomputed hash.
    HashMismatch,
    /// A linkage violation: either `previous_hash` does not match the
    /// predecessor's `record_hash`, or the first record does not link to
    /// the genesis constant.
    BrokenLink,
    /// A record's timestamp is earlier than its predecessor's.
    TimestampViolation,
    /// The record failed structural conformance against the record schema.
    SchemaInvalid,
}

impl fmt::Display for TamperKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TamperKind::HashMismatch => "hash-mismatch",
            TamperKind::BrokenLink => "broken-link",
            TamperKind::TimestampViolation => "timestamp-violation",
            TamperKind::SchemaInvalid => "schema-invalid",
        };
        f.write_str(name)
    }
}

/// One discovered integrity violation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TamperEvidence {
    /// The `record_id` of the offending record.
    pub record_id: String,

    /// The violation category, tagged at detection time.
    pub tampering_type: TamperKind,

    /// Human-readable description of what was found.
    pub description: String,

    /// 0-based index in the *supplied* sequence — a property of the input
    /// as handed to the verifier, not of the original unbroken chain.
    pub position: usize,
}

/// The overall integrity classification of a verified chain.
///
/// `Incomplete` is reserved for chains whose continuity cannot be
/// established (missing or reordered records); tampering inside a still
/// linearly intact chain is `Invalid`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IntegrityStatus {
    /// No tamper evidence of any kind.
    Valid,
    /// Tampering evident, but the chain shape is linearly intact.
    Invalid,
    /// Chain continuity cannot be established.
    Incomplete,
}

impl fmt::Display for IntegrityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            IntegrityStatus::Valid => "VALID",
            IntegrityStatus::Invalid => "INVALID",
            IntegrityStatus::Incomplete => "INCOMPLETE",
        };
        f.write_str(name)
    }
}
