//! Structured schema-validation failures.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One structural conformance failure reported by a schema validator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemaViolation {
    /// JSON Pointer to the offending location, or empty for the document root.
    pub path: String,

    /// The validator's explanation of the failure.
    pub message: String,
}

impl fmt::Display for SchemaViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            f.write_str(&self.message)
        } else {
            write!(f, "{}: {}", self.path, self.message)
        }
    }
}
