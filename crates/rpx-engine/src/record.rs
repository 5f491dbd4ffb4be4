//! Single-record verification.
//!
//! A record is checked in two phases, in fixed order:
//!
//! 1. **Structural** — conformance against the record schema via the
//!    injected [`SchemaValidator`]. A structural failure short-circuits:
//!    the hash of a malformed record cannot be meaningfully interpreted.
//! 2. **Hash integrity** — the stored `record_hash` is compared against
//!    the recomputed canonical hash.
//!
//! The verdict carries the failure cause as a tag assigned at the point of
//! detection, so downstream consumers never have to infer it from message
//! text. Verification has no side effects, is deterministic, and is safe
//! to run concurrently on independent records.

use tracing::{debug, warn};

use rpx_canonical::compute_record_hash;
use rpx_contracts::{record::RpxRecord, schema::SchemaViolation};

use crate::traits::SchemaValidator;

/// The outcome of verifying one record in isolation.
///
/// Callers pattern-match on this to decide what to do next:
/// - `Valid` → proceed; surface `warnings` as advisory output
/// - `SchemaInvalid` → record tamper evidence under the schema category
/// - `HashMismatch` → record tamper evidence under the hash category
#[derive(Debug, Clone)]
pub enum RecordVerdict {
    /// Structurally conformant and hash-intact.
    ///
    /// `warnings` lists advisory findings (missing optional fields); they
    /// never affect validity.
    Valid { warnings: Vec<String> },

    /// Structural conformance failed. The hash check did not run.
    SchemaInvalid { violations: Vec<SchemaViolation> },

    /// The stored `record_hash` disagrees with the recomputed hash.
    HashMismatch {
        /// The `record_id` of the failing record.
        record_id: String,
        /// The hash stored in the record.
        stored: String,
        /// The hash recomputed from the canonical fields.
        computed: String,
    },
}

impl RecordVerdict {
    /// True only for `Valid`.
    pub fn is_valid(&self) -> bool {
        matches!(self, RecordVerdict::Valid { .. })
    }

    /// Render the failure as human-readable error lines. Empty for `Valid`.
    pub fn errors(&self) -> Vec<String> {
        match self {
            RecordVerdict::Valid { .. } => Vec::new(),
            RecordVerdict::SchemaInvalid { violations } => violations
                .iter()
                .map(|v| format!("schema validation failed: {v}"))
                .collect(),
            RecordVerdict::HashMismatch {
                record_id,
                stored,
                computed,
            } => vec![format!(
                "hash mismatch for record {record_id}: stored hash {stored} does not match \
                 computed hash {computed}"
            )],
        }
    }
}

/// Verifies one record at a time against the record schema and its own hash.
pub struct RecordVerifier {
    validator: Box<dyn SchemaValidator>,
}

impl RecordVerifier {
    /// Create a verifier that checks structural conformance with `validator`.
    pub fn new(validator: Box<dyn SchemaValidator>) -> Self {
        Self { validator }
    }

    /// Verify `record` in isolation.
    ///
    /// # Panics
    ///
    /// Panics if the record cannot be serialized to JSON — which cannot
    /// happen for the well-formed `RpxRecord` type.
    pub fn verify(&self, record: &RpxRecord) -> RecordVerdict {
        let document = serde_json::to_value(record)
            .expect("RpxRecord must always be serializable to JSON");

        // ── Phase 1: structural conformance ──────────────────────────────────
        let violations = self.validator.validate(&document);
        if !violations.is_empty() {
            warn!(
                record_id = %record.record_id,
                violation_count = violations.len(),
                "record failed schema validation"
            );
            return RecordVerdict::SchemaInvalid { violations };
        }

        // ── Phase 2: hash integrity ──────────────────────────────────────────
        let computed = compute_record_hash(record);
        if computed != record.record_hash {
            warn!(
                record_id = %record.record_id,
                stored = %record.record_hash,
                computed = %computed,
                "record hash mismatch"
            );
            return RecordVerdict::HashMismatch {
                record_id: record.record_id.clone(),
                stored: record.record_hash.clone(),
                computed,
            };
        }

        // Advisory warnings for absent optional fields. Never fatal.
        let mut warnings = Vec::new();
        if record.action_type.is_none() {
            warnings.push("no action_type specified (optional field)".to_string());
        }
        if record.reason.is_none() {
            warnings.push("no reason specified (optional field)".to_string());
        }

        debug!(record_id = %record.record_id, "record verified");
        RecordVerdict::Valid { warnings }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use rpx_canonical::{compute_record_hash, GENESIS_HASH};
    use rpx_contracts::{record::RpxRecord, schema::SchemaViolation};

    use super::{RecordVerdict, RecordVerifier};
    use crate::traits::SchemaValidator;

    // ── Fake validators ───────────────────────────────────────────────────────

    /// Accepts every document.
    struct AcceptAll;

    impl SchemaValidator for AcceptAll {
        fn validate(&self, _document: &serde_json::Value) -> Vec<SchemaViolation> {
            Vec::new()
        }
    }

    /// Rejects every document with a fixed violation list.
    struct RejectAll;

    impl SchemaValidator for RejectAll {
        fn validate(&self, _document: &serde_json::Value) -> Vec<SchemaViolation> {
            vec![
                SchemaViolation {
                    path: "/record_id".to_string(),
                    message: "\"short\" is shorter than 8 characters".to_string(),
                },
                SchemaViolation {
                    path: "/outcome".to_string(),
                    message: "\"MAYBE\" is not one of the allowed values".to_string(),
                },
            ]
        }
    }

    // ── Builder helpers ───────────────────────────────────────────────────────

    fn make_record() -> RpxRecord {
        let mut record = RpxRecord {
            record_id: "rec_2025-12-01_000".to_string(),
            timestamp: "2025-12-01T00:00:00.000000Z".to_string(),
            previous_hash: GENESIS_HASH.to_string(),
            decision_type: "authorization.action".to_string(),
            agent_id: "dealgo-v1-0".to_string(),
            outcome: "ALLOW".to_string(),
            context_hash: "a".repeat(64),
            policy_version: "policy-v1.0.0".to_string(),
            action_type: Some("tool_call".to_string()),
            reason: Some("requested by operator".to_string()),
            record_hash: String::new(),
            metadata: None,
        };
        record.record_hash = compute_record_hash(&record);
        record
    }

    // ── Tests ─────────────────────────────────────────────────────────────────

    /// A conformant, correctly hashed record with all optional fields is
    /// valid with no warnings.
    #[test]
    fn valid_record_with_optionals_has_no_warnings() {
        let verifier = RecordVerifier::new(Box::new(AcceptAll));
        let record = make_record();

        match verifier.verify(&record) {
            RecordVerdict::Valid { warnings } => assert!(warnings.is_empty()),
            other => panic!("expected Valid, got {other:?}"),
        }
    }

    /// Missing optional fields produce advisory warnings without flipping
    /// validity.
    #[test]
    fn missing_optional_fields_warn_but_stay_valid() {
        let verifier = RecordVerifier::new(Box::new(AcceptAll));
        let mut record = make_record();
        record.action_type = None;
        record.reason = None;
        record.record_hash = compute_record_hash(&record);

        let verdict = verifier.verify(&record);
        assert!(verdict.is_valid());
        match verdict {
            RecordVerdict::Valid { warnings } => {
                assert_eq!(warnings.len(), 2);
                assert!(warnings[0].contains("action_type"));
                assert!(warnings[1].contains("reason"));
            }
            other => panic!("expected Valid, got {other:?}"),
        }
    }

    /// A hash mismatch is reported under its own tag, naming the record id
    /// and both hashes.
    #[test]
    fn tampered_record_yields_hash_mismatch() {
        let verifier = RecordVerifier::new(Box::new(AcceptAll));
        let mut record = make_record();
        record.outcome = "DENY".to_string(); // stored record_hash now stale

        let verdict = verifier.verify(&record);
        match &verdict {
            RecordVerdict::HashMismatch {
                record_id,
                stored,
                computed,
            } => {
                assert_eq!(record_id, "rec_2025-12-01_000");
                assert_eq!(stored, &record.record_hash);
                assert_ne!(stored, computed);
            }
            other => panic!("expected HashMismatch, got {other:?}"),
        }

        let errors = verdict.errors();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("rec_2025-12-01_000"));
    }

    /// Schema failure short-circuits before the hash check: a record that
    /// is both malformed and tampered reports only the schema violations.
    #[test]
    fn schema_failure_short_circuits_hash_check() {
        let verifier = RecordVerifier::new(Box::new(RejectAll));
        let mut record = make_record();
        record.record_hash = "f".repeat(64); // would be a hash mismatch

        match verifier.verify(&record) {
            RecordVerdict::SchemaInvalid { violations } => {
                assert_eq!(violations.len(), 2);
                assert_eq!(violations[0].path, "/record_id");
            }
            other => panic!("expected SchemaInvalid, got {other:?}"),
        }
    }

    /// Verdict error rendering includes every schema violation.
    #[test]
    fn schema_invalid_errors_render_all_violations() {
        let verifier = RecordVerifier::new(Box::new(RejectAll));
        let errors = verifier.verify(&make_record()).errors();

        assert_eq!(errors.len(), 2);
        assert!(errors[0].contains("/record_id"));
        assert!(errors[1].contains("/outcome"));
    }

    /// Verification is deterministic: repeated calls agree.
    #[test]
    fn verification_is_deterministic() {
        let verifier = RecordVerifier::new(Box::new(AcceptAll));
        let mut record = make_record();
        record.outcome = "ESCALATE".to_string();

        let first = verifier.verify(&record).errors();
        let second = verifier.verify(&record).errors();
        assert_eq!(first, second);
    }
}
