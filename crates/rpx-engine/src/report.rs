//! Verification report generation.
//!
//! Wraps chain verification with compliance-guarantee derivation and
//! assembles the final audit document. The five constitutional guarantees
//! are derived from the static record set only — two of them
//! (`fail_closed_verified`, `human_escalation_available`) are always false
//! because a static log cannot witness runtime behavior. That boundary is
//! deliberate and load-bearing: this tool never claims more than the log
//! can show.

use std::collections::HashSet;

use chrono::Utc;
use tracing::{debug, info};
use uuid::Uuid;

use rpx_contracts::{
    error::{RpxError, RpxResult},
    evidence::IntegrityStatus,
    record::RpxRecord,
    report::{
        ChainMetadata, ComplianceDetails, ComplianceLevel, ConstitutionalGuarantees, TimeRange,
        VerificationReport, VerificationScope,
    },
};

use crate::chain::ChainVerifier;
use crate::traits::SchemaValidator;

/// Generates the full verification report for a record sequence.
pub struct ReportGenerator {
    chain: ChainVerifier,
}

impl ReportGenerator {
    /// Create a generator whose chain verification uses `validator`.
    pub fn new(validator: Box<dyn SchemaValidator>) -> Self {
        Self {
            chain: ChainVerifier::new(validator),
        }
    }

    /// Verify `records` and assemble the verification report.
    ///
    /// # Errors
    ///
    /// Returns `RpxError::EmptyChain` when chain verification produced no
    /// proof — the empty-input case only.
    pub fn generate(
        &self,
        records: &[RpxRecord],
        chain_id: Option<&str>,
    ) -> RpxResult<VerificationReport> {
        let verification = self.chain.verify(records, chain_id);
        let proof = verification.proof.ok_or(RpxError::EmptyChain)?;

        // ISO-8601 in the canonical fixed-width format sorts
        // lexicographically in temporal order.
        let mut timestamps: Vec<&str> = records.iter().map(|r| r.timestamp.as_str()).collect();
        timestamps.sort_unstable();

        let guarantees = derive_guarantees(records, verification.status);
        let (compliance_level, notes) = derive_compliance(verification.status, &guarantees);

        let mut decision_types: Vec<String> = Vec::new();
        for record in records {
            if !decision_types.contains(&record.decision_type) {
                decision_types.push(record.decision_type.clone());
            }
        }
        let agent_count = records
            .iter()
            .map(|r| r.agent_id.as_str())
            .collect::<HashSet<_>>()
            .len();

        let report = VerificationReport {
            report_id: format!("report-{}", Uuid::new_v4()),
            timestamp: Utc::now(),
            chain_id: proof.chain_id.clone(),
            verification_scope: VerificationScope {
                records_verified: records.len(),
                time_range: TimeRange {
                    earliest: timestamps[0].to_string(),
                    latest: timestamps[timestamps.len() - 1].to_string(),
                },
            },
            integrity_status: verification.status,
            compliance_details: ComplianceDetails {
                constitutional_guarantees: guarantees,
                compliance_level,
                notes,
            },
            tamper_evidence: proof.tamper_evidence,
            chain_metadata: ChainMetadata {
                genesis_hash: proof.genesis_hash,
                current_head: proof.current_head,
                decision_types,
                agent_count,
            },
        };

        info!(
            report_id = %report.report_id,
            status = %report.integrity_status,
            records = records.len(),
            "verification report generated"
        );

        Ok(report)
    }
}

/// Derive the five constitutional guarantee booleans from the static
/// record set and the chain status.
fn derive_guarantees(
    records: &[RpxRecord],
    status: IntegrityStatus,
) -> ConstitutionalGuarantees {
    let guarantees = ConstitutionalGuarantees {
        rpx_records_present: records.iter().all(|r| {
            !r.record_id.is_empty()
                && !r.timestamp.is_empty()
                && !r.decision_type.is_empty()
                && !r.outcome.is_empty()
        }),
        // Requires runtime inspection of the producing system.
        fail_closed_verified: false,
        // Requires inspection of the surrounding system.
        human_escalation_available: false,
        hash_chain_intact: status == IntegrityStatus::Valid,
        context_captured: records.iter().all(|r| r.context_hash.chars().count() == 64),
    };

    debug!(
        rpx_records_present = guarantees.rpx_records_present,
        hash_chain_intact = guarantees.hash_chain_intact,
        context_captured = guarantees.context_captured,
        "constitutional guarantees derived"
    );
    guarantees
}

/// Derive the compliance level and explanatory note.
///
/// A level is only assessable over a fully intact chain. L1 additionally
/// requires the record-presence and context-capture guarantees; higher
/// levels require runtime verification and are never derivable here.
fn derive_compliance(
    status: IntegrityStatus,
    guarantees: &ConstitutionalGuarantees,
) -> (Option<ComplianceLevel>, String) {
    if status != IntegrityStatus::Valid {
        return (
            None,
            format!("chain integrity failed: {status}; cannot assess compliance level"),
        );
    }

    if guarantees.rpx_records_present && guarantees.context_captured {
        return (
            Some(ComplianceLevel::L1),
            "L1 (basic): RPX records present with context capture; fail-closed and escalation \
             guarantees require runtime verification and cannot be assessed from a static chain"
                .to_string(),
        );
    }

    let mut gaps: Vec<&str> = Vec::new();
    if !guarantees.rpx_records_present {
        gaps.push("records are missing required decision fields");
    }
    if !guarantees.context_captured {
        gaps.push("context hashes are not fully captured");
    }
    (None, format!("L1 criteria not met: {}", gaps.join("; ")))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
