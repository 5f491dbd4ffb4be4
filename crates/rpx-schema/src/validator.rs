//! JSON Schema validation backed by the `jsonschema` crate.
//!
//! Each [`JsonSchemaValidator`] wraps one compiled schema. All violations
//! are collected in one pass via `iter_errors` — operators see the full
//! failure set, never just the first.

use tracing::debug;

use rpx_contracts::{
    error::{RpxError, RpxResult},
    schema::SchemaViolation,
};
use rpx_engine::SchemaValidator;

const RECORD_SCHEMA: &str = include_str!("../schemas/rpx-record.schema.json");
const CHAIN_PROOF_SCHEMA: &str = include_str!("../schemas/chain-proof.schema.json");
const VERIFICATION_REPORT_SCHEMA: &str =
    include_str!("../schemas/verification-report.schema.json");

/// A `SchemaValidator` compiled from one embedded JSON Schema document.
pub struct JsonSchemaValidator {
    validator: jsonschema::Validator,
}

impl JsonSchemaValidator {
    /// Validator for RPX records.
    pub fn for_record() -> RpxResult<Self> {
        Self::from_schema_str(RECORD_SCHEMA)
    }

    /// Validator for emitted chain-proof documents.
    pub fn for_chain_proof() -> RpxResult<Self> {
        Self::from_schema_str(CHAIN_PROOF_SCHEMA)
    }

    /// Validator for emitted verification-report documents.
    pub fn for_verification_report() -> RpxResult<Self> {
        Self::from_schema_str(VERIFICATION_REPORT_SCHEMA)
    }

    /// Compile a validator from a raw JSON Schema document.
    ///
    /// Returns `RpxError::SchemaCompile` when `raw` is not valid JSON or
    /// not a compilable schema.
    pub fn from_schema_str(raw: &str) -> RpxResult<Self> {
        let schema: serde_json::Value =
            serde_json::from_str(raw).map_err(|e| RpxError::SchemaCompile {
                reason: format!("schema document is not valid JSON: {e}"),
            })?;
        let validator =
            jsonschema::validator_for(&schema).map_err(|e| RpxError::SchemaCompile {
                reason: e.to_string(),
            })?;
        Ok(Self { validator })
    }
}

impl SchemaValidator for JsonSchemaValidator {
    /// Validate `document` and return every violation found.
    fn validate(&self, document: &serde_json::Value) -> Vec<SchemaViolation> {
        let violations: Vec<SchemaViolation> = self
            .validator
            .iter_errors(document)
            .map(|error| SchemaViolation {
                path: error.instance_path.to_string(),
                message: error.to_string(),
            })
            .collect();

        debug!(
            violation_count = violations.len(),
            "schema validation complete"
        );
        violations
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
