//! # rpx-schema
//!
//! Embedded JSON Schema documents and the concrete
//! [`rpx_engine::SchemaValidator`] implementation backing them.
//!
//! Three document shapes are covered: the RPX record read from decision
//! logs, the chain proof the verifier emits, and the verification report.
//! The schema sources live under `schemas/` and are compiled once per
//! validator at construction time.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use rpx_engine::ChainVerifier;
//! use rpx_schema::JsonSchemaValidator;
//!
//! let verifier = ChainVerifier::new(Box::new(JsonSchemaValidator::for_record()?));
//! let result = verifier.verify(&records, None);
//! ```

pub mod validator;

pub use validator::JsonSchemaValidator;
