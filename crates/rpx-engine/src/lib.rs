//! # rpx-engine
//!
//! The RPX chain verification engine.
//!
//! Data flows one way through three layers, leaves first:
//!
//! - [`record::RecordVerifier`] — validates one record in isolation
//!   (schema conformance, then hash integrity)
//! - [`chain::ChainVerifier`] — validates an ordered sequence: individual
//!   validity, genesis linkage, continuity, temporal monotonicity;
//!   classifies tamper evidence and derives an integrity status
//! - [`report::ReportGenerator`] — wraps chain verification with
//!   compliance-guarantee derivation and assembles the final report
//!
//! No layer calls back into an earlier one. All verification is
//! synchronous, read-only over its input, and free of shared mutable
//! state — every call is independent and reentrant. Tamper findings are
//! collected exhaustively: the engine never stops at the first anomaly.
//!
//! Structural schema validation is consumed as an injected capability
//! ([`traits::SchemaValidator`]) so the engine can be exercised against a
//! fake validator without the real schema documents.

pub mod chain;
pub mod record;
pub mod report;
pub mod traits;

pub use chain::{ChainVerification, ChainVerifier};
pub use record::{RecordVerdict, RecordVerifier};
pub use report::ReportGenerator;
pub use traits::SchemaValidator;
