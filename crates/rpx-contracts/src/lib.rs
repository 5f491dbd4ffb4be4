//! # rpx-contracts
//!
//! Shared types for the RPX chain verification suite.
//!
//! All crates in the workspace import from here. No business logic lives in
//! this crate — only data definitions and error types. Every type that
//! appears on the wire (records read from a log, proof and report documents
//! written for auditors) carries serde derives with the canonical field
//! names.

pub mod error;
pub mod evidence;
pub mod proof;
pub mod record;
pub mod report;
pub mod schema;
