//! Canonical hashing primitives for RPX records.
//!
//! The canonical form of a record is the compact JSON serialization of its
//! hash-relevant fields with strictly lexicographic key order, UTF-8
//! encoded, with no insignificant whitespace. Every field that contributes
//! to the hash is listed explicitly so nothing is accidentally included.
//!
//! Hash-relevant fields (canonical key order):
//!   action_type (if present), agent_id, context_hash, decision_type,
//!   outcome, policy_version, previous_hash, reason (if present),
//!   record_id, timestamp
//!
//! Excluded by contract: `record_hash` (the commitment itself) and
//! `metadata` (free-form annotations that must not disturb the chain).
//!
//! Key ordering is fixed by serializing through a `BTreeMap`, never by
//! relying on a host serializer's default field order — the default-order
//! output of a struct serializer is not a canonical form.

use std::collections::BTreeMap;

use serde_json::Value;
use sha2::{Digest, Sha256};

use rpx_contracts::record::RpxRecord;

/// The genesis sentinel: the SHA-256 hash of the empty string.
///
/// Required as the `previous_hash` of the first record in any chain
/// claiming to start from genesis. A process-wide immutable constant,
/// compared by equality.
pub const GENESIS_HASH: &str = "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";

/// True when `hash` equals the genesis sentinel.
pub fn is_genesis_hash(hash: &str) -> bool {
    hash == GENESIS_HASH
}

/// Produce the canonical byte sequence for a record's hash-relevant fields.
///
/// Optional fields that are absent are omitted from the canonical form
/// entirely — an absent `reason` and a `reason` of empty string hash
/// differently, by design of the record format.
///
/// # Panics
///
/// Panics if the field map cannot be serialized to JSON — which cannot
/// happen for a map of plain string values.
pub fn canonical_record_bytes(record: &RpxRecord) -> Vec<u8> {
    let mut fields: BTreeMap<&str, Value> = BTreeMap::new();

    fields.insert("record_id", Value::String(record.record_id.clone()));
    fields.insert("timestamp", Value::String(record.timestamp.clone()));
    fields.insert("previous_hash", Value::String(record.previous_hash.clone()));
    fields.insert("decision_type", Value::String(record.decision_type.clone()));
    fields.insert("agent_id", Value::String(record.agent_id.clone()));
    fields.insert("outcome", Value::String(record.outcome.clone()));
    fields.insert("context_hash", Value::String(record.context_hash.clone()));
    fields.insert("policy_version", Value::String(record.policy_version.clone()));

    if let Some(action_type) = &record.action_type {
        fields.insert("action_type", Value::String(action_type.clone()));
    }
    if let Some(reason) = &record.reason {
        fields.insert("reason", Value::String(reason.clone()));
    }

    serde_json::to_vec(&fields).expect("a map of string values must serialize to JSON")
}

/// Compute the canonical SHA-256 hash of a record.
///
/// Returns 64 lowercase hex characters. Pure and deterministic: identical
/// input bytes produce identical output on every platform.
pub fn compute_record_hash(record: &RpxRecord) -> String {
    let mut hasher = Sha256::new();
    hasher.update(canonical_record_bytes(record));
    hex::encode(hasher.finalize())
}

/// Recompute a record's hash and compare it to the stored `record_hash`.
pub fn verify_record_hash(record: &RpxRecord) -> bool {
    compute_record_hash(record) == record.record_hash
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use rpx_contracts::record::RpxRecord;
    use sha2::{Digest, Sha256};

    use super::{
        canonical_record_bytes, compute_record_hash, is_genesis_hash, verify_record_hash,
        GENESIS_HASH,
    };

    // ── Helpers ───────────────────────────────────────────────────────────────

    fn base_record() -> RpxRecord {
        RpxRecord {
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
        }
    }

    // ── Genesis constant ──────────────────────────────────────────────────────

    /// The genesis constant is the SHA-256 of the empty string, not an
    /// arbitrary sentinel.
    #[test]
    fn genesis_hash_is_sha256_of_empty_string() {
        let empty = hex::encode(Sha256::digest(b""));
        assert_eq!(GENESIS_HASH, empty);
    }

    #[test]
    fn is_genesis_hash_compares_by_equality() {
        assert!(is_genesis_hash(GENESIS_HASH));
        assert!(!is_genesis_hash(&"0".repeat(64)));
        assert!(!is_genesis_hash(""));
    }

    // ── Canonical form ────────────────────────────────────────────────────────

    /// The canonical bytes are exactly the compact JSON of the hash-relevant
    /// fields in lexicographic key order.
    #[test]
    fn canonical_bytes_are_sorted_compact_json() {
        let mut record = base_record();
        record.context_hash = "c".repeat(64);
        record.previous_hash = "p".repeat(64);

        let expected = format!(
            concat!(
                "{{\"action_type\":\"tool_call\",",
                "\"agent_id\":\"dealgo-v1-0\",",
                "\"context_hash\":\"{}\",",
                "\"decision_type\":\"authorization.action\",",
                "\"outcome\":\"ALLOW\",",
                "\"policy_version\":\"policy-v1.0.0\",",
                "\"previous_hash\":\"{}\",",
                "\"reason\":\"requested by operator\",",
                "\"record_id\":\"rec_2025-12-01_000\",",
                "\"timestamp\":\"2025-12-01T00:00:00.000000Z\"}}"
            ),
            "c".repeat(64),
            "p".repeat(64),
        );

        assert_eq!(canonical_record_bytes(&record), expected.into_bytes());
    }

    /// Hashing is deterministic: two calls on identical input agree.
    #[test]
    fn hash_is_deterministic() {
        let record = base_record();
        assert_eq!(compute_record_hash(&record), compute_record_hash(&record));
    }

    /// Two logically identical records with differently ordered JSON keys
    /// hash identically — canonicalization is field-order-independent.
    #[test]
    fn hash_is_field_order_independent() {
        let ordered = r#"{
            "record_id": "rec_2025-12-01_000",
            "timestamp": "2025-12-01T00:00:00.000000Z",
            "previous_hash": "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855",
            "decision_type": "authorization.action",
            "agent_id": "dealgo-v1-0",
            "outcome": "ALLOW",
            "context_hash": "aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa",
            "policy_version": "policy-v1.0.0",
            "record_hash": "0000000000000000000000000000000000000000000000000000000000000000"
        }"#;
        let shuffled = r#"{
            "record_hash": "0000000000000000000000000000000000000000000000000000000000000000",
            "policy_version": "policy-v1.0.0",
            "outcome": "ALLOW",
            "context_hash": "aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa",
            "agent_id": "dealgo-v1-0",
            "decision_type": "authorization.action",
            "previous_hash": "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855",
            "timestamp": "2025-12-01T00:00:00.000000Z",
            "record_id": "rec_2025-12-01_000"
        }"#;

        let a: RpxRecord = serde_json::from_str(ordered).unwrap();
        let b: RpxRecord = serde_json::from_str(shuffled).unwrap();

        assert_eq!(compute_record_hash(&a), compute_record_hash(&b));
    }

    /// `metadata` is excluded from the canonical form: records differing
    /// only in metadata hash identically.
    #[test]
    fn metadata_does_not_affect_hash() {
        let plain = base_record();
        let mut annotated = base_record();
        annotated.metadata = Some(serde_json::json!({ "note": "added after the fact" }));

        assert_eq!(compute_record_hash(&plain), compute_record_hash(&annotated));
    }

    /// `record_hash` is excluded from its own computation.
    #[test]
    fn stored_hash_does_not_affect_hash() {
        let mut a = base_record();
        let mut b = base_record();
        a.record_hash = "1".repeat(64);
        b.record_hash = "2".repeat(64);

        assert_eq!(compute_record_hash(&a), compute_record_hash(&b));
    }

    /// Absent optional fields are omitted, so presence itself is
    /// hash-relevant.
    #[test]
    fn absent_optional_fields_change_hash()  {
        let full = base_record();
        let mut without_reason = base_record();
        without_reason.reason = None;

        assert_ne!(
            compute_record_hash(&full),
            compute_record_hash(&without_reason)
        );
        assert!(!String::from_utf8(canonical_record_bytes(&without_reason))
            .unwrap()
            .contains("reason"));
    }

    /// Every hash-relevant field participates: flipping one flips the hash.
    #[test]
    fn each_hash_relevant_field_participates() {
        let baseline = compute_record_hash(&base_record());

        let mutations: Vec<Box<dyn Fn(&mut RpxRecord)>> = vec![
            Box::new(|r| r.record_id = "rec_2025-12-01_XXX".to_string()),
            Box::new(|r| r.timestamp = "2025-12-01T00:00:01.000000Z".to_string()),
            Box::new(|r| r.previous_hash = "0".repeat(64)),
            Box::new(|r| r.decision_type = "safety.constraint".to_string()),
            Box::new(|r| r.agent_id = "dealgo-v1-1".to_string()),
            Box::new(|r| r.outcome = "DENY".to_string()),
            Box::new(|r| r.context_hash = "b".repeat(64)),
            Box::new(|r| r.policy_version = "policy-v1.0.1".to_string()),
            Box::new(|r| r.action_type = Some("db_query".to_string())),
            Box::new(|r| r.reason = Some("different rationale".to_string())),
        ];

        for mutate in mutations {
            let mut record = base_record();
            mutate(&mut record);
            assert_ne!(
                compute_record_hash(&record),
                baseline,
                "mutated record must not hash to the baseline"
            );
        }
    }

    // ── verify_record_hash ────────────────────────────────────────────────────

    #[test]
    fn verify_accepts_correctly_hashed_record() {
        let mut record = base_record();
        record.record_hash = compute_record_hash(&record);
        assert!(verify_record_hash(&record));
    }

    #[test]
    fn verify_rejects_tampered_record() {
        let mut record = base_record();
        record.record_hash = compute_record_hash(&record);

        // Flip one hash-relevant field without recomputing the hash.
        record.outcome = "DENY".to_string();
        assert!(!verify_record_hash(&record));
    }

    #[test]
    fn verify_rejects_wrong_stored_hash() {
        let mut record = base_record();
        record.record_hash = "f".repeat(64);
        assert!(!verify_record_hash(&record));
    }
}
