// Path: crates/types/src/codec.rs

//! Defines the canonical JSON codec and digest used for content integrity.
//!
//! The on-chain record stores a digest of a proposal body's *canonical*
//! serialization, so two semantically identical documents must always
//! produce the same bytes before hashing. This module wraps `serde_jcs`
//! (RFC 8785 JSON Canonicalization Scheme): object keys are sorted and
//! number/string forms are normalized, making the serialization independent
//! of field order or formatting at the call site. By centralizing the codec
//! here in the base `types` crate, every component hashes the exact same
//! byte representation of the same data.

use serde::Serialize;
use sha3::{Digest, Keccak256};

/// Encodes a value into deterministic, canonical JSON bytes (RFC 8785).
///
/// Use this for any data whose digest is stored on-chain or compared across
/// components.
pub fn to_canonical_json<T: Serialize>(v: &T) -> Result<Vec<u8>, String> {
    serde_jcs::to_vec(v).map_err(|e| format!("canonical encode failed: {}", e))
}

/// Computes the Keccak-256 digest of a byte slice.
pub fn keccak256(bytes: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak256::new();
    hasher.update(bytes);
    hasher.finalize().into()
}

/// Computes the content digest of a value: Keccak-256 over its canonical
/// JSON serialization.
pub fn content_digest<T: Serialize>(v: &T) -> Result<[u8; 32], String> {
    Ok(keccak256(&to_canonical_json(v)?))
}
