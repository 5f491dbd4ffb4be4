//! # rpx-canonical
//!
//! Deterministic canonicalization and SHA-256 hashing for RPX records.
//!
//! A record's `record_hash` commits to its hash-relevant fields through a
//! canonical byte sequence that is reproducible across platforms and
//! languages. [`hash::canonical_record_bytes`] defines that sequence;
//! [`hash::compute_record_hash`] and [`hash::verify_record_hash`] build on
//! it. The genesis sentinel every chain must start from lives here as
//! [`hash::GENESIS_HASH`].

pub mod hash;

pub use hash::{
    canonical_record_bytes, compute_record_hash, is_genesis_hash, verify_record_hash,
    GENESIS_HASH,
};
