//! The RPX decision record.
//!
//! One record per decision event, read from an append-only JSONL log. The
//! wire-facing fields stay plain `String`s: value constraints (lengths, hex
//! patterns, enum membership) are enforced by the schema validator rather
//! than by the Rust type system, so a constraint violation surfaces as
//! tamper evidence instead of aborting the read. A *missing* required field
//! is different — it fails deserialization and is fatal to the whole read.

use serde::{Deserialize, Serialize};

/// One decision event in an RPX chain.
///
/// `record_hash` commits to every field except itself and `metadata`: the
/// hash-relevant fields are canonicalized (lexicographic key order, compact
/// JSON, UTF-8) and fed to SHA-256. Tampering with any hash-relevant field
/// without recomputing `record_hash` is detectable; `metadata` is an
/// explicit escape hatch for annotations that must not disturb the chain.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpxRecord {
    /// Opaque identifier, 8–64 characters.
    pub record_id: String,

    /// ISO-8601 timestamp with microsecond precision
    /// (e.g. `2025-12-01T00:00:00.000000Z`). Fixed-width and zero-padded,
    /// so the string ordering agrees with the temporal ordering.
    pub timestamp: String,

    /// `record_hash` of the preceding record, or the genesis constant for
    /// the first record. 64 lowercase hex characters.
    pub previous_hash: String,

    /// Decision category: `authorization.action`, `safety.constraint`, or
    /// `policy.evaluation`.
    pub decision_type: String,

    /// The agent that produced this decision.
    pub agent_id: String,

    /// Decision outcome: `ALLOW`, `DENY`, or `ESCALATE`.
    pub outcome: String,

    /// SHA-256 of the decision context, captured by the producer.
    /// 64 lowercase hex characters.
    pub context_hash: String,

    /// Version of the policy the producer evaluated.
    pub policy_version: String,

    /// The kind of action the decision concerns. Optional; its absence is
    /// surfaced as an advisory warning, never an error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action_type: Option<String>,

    /// Human-readable rationale for the decision. Optional, advisory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,

    /// SHA-256 over the canonicalized hash-relevant fields.
    /// 64 lowercase hex characters.
    pub record_hash: String,

    /// Free-form annotations, excluded from hashing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
}
