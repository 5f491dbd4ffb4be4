//! The verification report document.
//!
//! A `VerificationReport` is the audit-evidence superset of a chain proof:
//! scope, integrity status, compliance derivation, the full tamper-evidence
//! list, and chain metadata. Built once per generation call.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::evidence::{IntegrityStatus, TamperEvidence};

/// The full verification report assembled by the report generator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationReport {
    /// Unique identifier for this report document (`report-<uuid>`).
    pub report_id: String,

    /// Wall-clock time (UTC) the report was generated.
    pub timestamp: DateTime<Utc>,

    /// Caller-supplied chain identifier, or the proof's derived default.
    pub chain_id: String,

    /// What was examined: record count and covered time range.
    pub verification_scope: VerificationScope,

    /// The chain verifier's integrity classification.
    pub integrity_status: IntegrityStatus,

    /// Guarantee booleans, compliance level, and explanatory notes.
    pub compliance_details: ComplianceDetails,

    /// Every violation discovered, in discovery order.
    pub tamper_evidence: Vec<TamperEvidence>,

    /// Descriptive chain metadata for auditors.
    pub chain_metadata: ChainMetadata,
}

/// The extent of the verification run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationScope {
    /// Number of records examined.
    pub records_verified: usize,

    /// Earliest and latest timestamps across the record set.
    pub time_range: TimeRange,
}

/// Timestamp bounds of the record set, taken from the timestamps sorted as
/// strings. ISO-8601 with a fixed-width, zero-padded format sorts
/// lexicographically in temporal order, which the canonical record format
/// guarantees.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeRange {
    pub earliest: String,
    pub latest: String,
}

/// Compliance assessment derived from the static record set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComplianceDetails {
    /// The five constitutional guarantee booleans.
    pub constitutional_guarantees: ConstitutionalGuarantees,

    /// Derived compliance tier, or `null` when no tier is assessable.
    /// Serialized as an explicit `null`, never omitted.
    pub compliance_level: Option<ComplianceLevel>,

    /// Free-text explanation of the derivation outcome.
    pub notes: String,
}

/// Constitutional guarantees assessable from a static decision log.
///
/// `fail_closed_verified` and `human_escalation_available` are always
/// `false`: they require live inspection of the producing system, which a
/// static log cannot provide. This is a hard boundary of the tool, not a
/// finding about the producer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConstitutionalGuarantees {
    /// Every record carries non-empty `record_id`, `timestamp`,
    /// `decision_type`, and `outcome`.
    pub rpx_records_present: bool,

    /// Always `false` — requires runtime inspection.
    pub fail_closed_verified: bool,

    /// Always `false` — requires system inspection.
    pub human_escalation_available: bool,

    /// Mirrors the chain status: `true` iff the chain verified `VALID`.
    pub hash_chain_intact: bool,

    /// Every record's `context_hash` is a 64-character value.
    pub context_captured: bool,
}

/// Coarse audit-assurance tier.
///
/// Only `L1` is derivable from a static chain; `L2` and `L3` require
/// runtime verification of the producing system and are present in the
/// taxonomy for document compatibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ComplianceLevel {
    L1,
    L2,
    L3,
}

impl std::fmt::Display for ComplianceLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ComplianceLevel::L1 => "L1",
            ComplianceLevel::L2 => "L2",
            ComplianceLevel::L3 => "L3",
        };
        f.write_str(name)
    }
}

/// Descriptive chain metadata carried alongside the assessment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChainMetadata {
    /// `record_hash` of the first supplied record.
    pub genesis_hash: String,

    /// `record_hash` of the last supplied record.
    pub current_head: String,

    /// Distinct decision types, in first-occurrence order.
    pub decision_types: Vec<String>,

    /// Number of distinct `agent_id` values.
    pub agent_count: usize,
}
