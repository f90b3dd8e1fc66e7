// Path: crates/content/src/pipeline.rs

//! The two-phase publish and verified-fetch pipeline.
//!
//! The on-chain transaction references the content's storage address, but
//! the address is computable before any upload. Publishing therefore runs
//! in two phases: [`ContentPipeline::prepare`] precomputes the expected
//! address and the content hash for the transaction, and only after the
//! transaction confirms does [`ContentPipeline::publish`] perform the real
//! store write. A failed or out-raced transaction then leaves no orphaned
//! upload behind, and callers can show a precise pending state in between.

use std::sync::Arc;

use agora_api::content::{ContentStore, PutMetadata};
use agora_types::app::{ContentHash, ParsedDocument, StorageAddress};
use agora_types::codec;
use agora_types::error::ContentError;
use agora_types::MAX_CONTENT_BODY_BYTES;

use crate::cid;
use crate::frontmatter;

/// A publish prepared but not yet written to the store.
///
/// Created before the on-chain transaction is submitted; the transaction
/// references [`PendingPublish::expected_address`] and
/// [`PendingPublish::content_hash`].
#[derive(Debug, Clone)]
pub struct PendingPublish {
    /// The address the store is expected to realize for this body.
    pub expected_address: StorageAddress,
    /// The digest of the canonicalized document, for the on-chain record.
    pub content_hash: ContentHash,
    bytes: Vec<u8>,
}

impl PendingPublish {
    /// The rendered body bytes that will be written.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

/// The outcome of a completed store write.
#[derive(Debug, Clone)]
pub struct PublishReport {
    /// The address precomputed before upload.
    pub expected_address: StorageAddress,
    /// The address the store actually assigned.
    pub realized_address: StorageAddress,
}

impl PublishReport {
    /// Whether the realized address diverged from the prediction. Logged as
    /// a warning and surfaced for operator visibility, but not fatal:
    /// stores may legitimately re-chunk content.
    pub fn conflict(&self) -> bool {
        self.expected_address != self.realized_address
    }
}

/// Pipeline over a pluggable content store.
pub struct ContentPipeline<S: ?Sized> {
    store: Arc<S>,
}

impl<S: ?Sized> Clone for ContentPipeline<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: ContentStore + ?Sized> ContentPipeline<S> {
    /// Wraps a long-lived store client.
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Computes the content address these bytes are expected to be stored
    /// under. Pure; independent of the store client.
    pub fn compute_expected_address(body: &[u8]) -> StorageAddress {
        cid::compute(body)
    }

    /// Computes the digest stored on-chain for a document: Keccak-256 over
    /// its canonical serialization, so semantically identical content
    /// always hashes identically.
    pub fn compute_content_hash(doc: &ParsedDocument) -> Result<ContentHash, ContentError> {
        let digest = codec::content_digest(doc).map_err(ContentError::Canonicalization)?;
        Ok(ContentHash(digest))
    }

    /// Phase one: renders the document and precomputes the (address, hash)
    /// pair the on-chain transaction will reference. No I/O.
    pub fn prepare(doc: &ParsedDocument) -> Result<PendingPublish, ContentError> {
        let bytes = frontmatter::render(doc).into_bytes();
        Ok(PendingPublish {
            expected_address: Self::compute_expected_address(&bytes),
            content_hash: Self::compute_content_hash(doc)?,
            bytes,
        })
    }

    /// Phase two, after on-chain confirmation: performs the actual store
    /// write and verifies the realized address against the prediction.
    pub async fn publish(
        &self,
        pending: &PendingPublish,
        metadata: &PutMetadata,
    ) -> Result<PublishReport, ContentError> {
        let realized = self
            .store
            .put(&pending.bytes, metadata)
            .await
            .map_err(|e| ContentError::from_store(e, &pending.expected_address.0))?;

        let report = PublishReport {
            expected_address: pending.expected_address.clone(),
            realized_address: realized,
        };
        if report.conflict() {
            tracing::warn!(
                expected = %report.expected_address,
                realized = %report.realized_address,
                "realized content address diverged from precomputed address"
            );
        }
        Ok(report)
    }

    /// Fetches the bytes at an address and splits them into metadata and
    /// body.
    pub async fn fetch_and_parse(
        &self,
        address: &StorageAddress,
    ) -> Result<ParsedDocument, ContentError> {
        let bytes = self
            .store
            .get(address)
            .await
            .map_err(|e| ContentError::from_store(e, &address.0))?;
        if bytes.len() > MAX_CONTENT_BODY_BYTES {
            return Err(ContentError::Malformed(format!(
                "body of {} bytes exceeds the {} byte limit",
                bytes.len(),
                MAX_CONTENT_BODY_BYTES
            )));
        }
        let text = String::from_utf8(bytes)
            .map_err(|_| ContentError::Malformed("body is not valid UTF-8".to_string()))?;
        frontmatter::parse(&text)
    }
}
