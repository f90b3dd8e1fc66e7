// Path: crates/content/src/cid.rs

//! Deterministic content-address computation.
//!
//! Addresses are CIDv0: the base58btc rendering of a SHA2-256 multihash
//! (`0x12 0x20` prefix followed by the 32-byte digest). Identical bytes
//! always yield the same address. A store that chunks large content into a
//! DAG may realize a different address than this single-block prediction;
//! that mismatch is the non-fatal `Conflict` case surfaced at publish time.

use agora_types::app::StorageAddress;
use sha2::{Digest, Sha256};

/// Multihash code for SHA2-256.
const MH_SHA2_256: u8 = 0x12;
/// Digest length for SHA2-256.
const MH_LEN: u8 = 32;

/// Computes the content address the store is expected to assign to these
/// bytes. Pure; never performs I/O.
pub fn compute(bytes: &[u8]) -> StorageAddress {
    let digest: [u8; 32] = Sha256::digest(bytes).into();
    let mut multihash = Vec::with_capacity(34);
    multihash.push(MH_SHA2_256);
    multihash.push(MH_LEN);
    multihash.extend_from_slice(&digest);
    StorageAddress(bs58::encode(multihash).into_string())
}
