//! Error types for the RPX verification suite.
//!
//! All fallible operations in the workspace return `RpxResult<T>`. Error
//! variants carry enough context to surface actionable messages to the
//! operator running the verifier.
//!
//! Note the boundary this enum draws: tamper findings are NOT errors. A
//! tampered chain verifies successfully and reports evidence; only
//! structural problems (unreadable input, unparsable lines, a broken
//! embedded schema) surface here.

use thiserror::Error;

/// The unified error type for the RPX verification suite.
#[derive(Debug, Error)]
pub enum RpxError {
    /// The supplied record sequence was empty, so no proof can be produced.
    #[error("chain is empty: verification produced no proof")]
    EmptyChain,

    /// The record log file could not be read at all.
    #[error("failed to read record log '{path}': {reason}")]
    LogRead { path: String, reason: String },

    /// One line of the record log could not be parsed as a record.
    ///
    /// This is fatal for the whole read — a partially parsed chain is never
    /// handed to the verifier.
    #[error("failed to parse line {line} of '{path}': {reason}")]
    LogParse {
        path: String,
        line: usize,
        reason: String,
    },

    /// A proof or report document could not be written to disk.
    #[error("failed to write document '{path}': {reason}")]
    DocumentWrite { path: String, reason: String },

    /// An embedded JSON Schema document failed to parse or compile.
    #[error("invalid JSON Schema document: {reason}")]
    SchemaCompile { reason: String },
}

/// Convenience alias used throughout the RPX crates.
pub type RpxResult<T> = Result<T, RpxError>;
