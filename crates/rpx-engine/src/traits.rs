//! Capability trait for structural schema validation.
//!
//! The engine treats schema validation as an injected collaborator: it
//! hands over a JSON document and receives a (possibly empty) list of
//! structured violations. The concrete JSON Schema documents live in
//! `rpx-schema`; engine tests substitute fakes.

use rpx_contracts::schema::SchemaViolation;

/// Structural conformance checking for wire documents.
///
/// Implementations are **trusted** and must be deterministic and free of
/// side effects — the verifiers call `validate()` once per record and rely
/// on identical input producing identical violations.
pub trait SchemaValidator: Send + Sync {
    /// Validate `document` and return every violation found.
    ///
    /// An empty list means the document conforms. Implementations must
    /// report all violations in one pass rather than stopping at the first.
    fn validate(&self, document: &serde_json::Value) -> Vec<SchemaViolation>;
}
