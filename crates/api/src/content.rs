// Path: crates/api/src/content.rs

//! The pluggable seam over a content-addressed store (a local node or a
//! pinning service).

use agora_types::app::StorageAddress;
use agora_types::error::StoreError;
use async_trait::async_trait;

/// Optional metadata attached to a store write.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PutMetadata {
    /// A display name for the pinned object, when the backend supports one.
    pub name: Option<String>,
    /// Whether the backend should pin the content durably.
    pub pin: bool,
}

/// A content-addressed store: identical bytes always map to the same
/// address, modulo store-specific chunking.
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Writes `bytes` to the store and returns the realized address.
    async fn put(&self, bytes: &[u8], metadata: &PutMetadata)
        -> Result<StorageAddress, StoreError>;

    /// Reads the bytes at `address`.
    async fn get(&self, address: &StorageAddress) -> Result<Vec<u8>, StoreError>;

    /// Computes the address these bytes would be stored under. Pure; never
    /// performs network I/O. A store that re-chunks large content may
    /// realize a different address than this prediction.
    fn compute_address(&self, bytes: &[u8]) -> StorageAddress;
}
