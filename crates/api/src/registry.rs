// Path: crates/api/src/registry.rs

//! The seam over the on-chain proposal registry contract.
//!
//! The registry exposes only a "next number" counter and per-number
//! lookups, not an index of valid numbers; range discovery is the sync
//! engine's job, not this trait's.

use agora_types::app::{
    ProposalVersionRecord, RegistryEvent, RegistryRecord, StatusVocabulary,
};
use agora_types::error::TransportError;
use async_trait::async_trait;

/// Typed access to the registry contract's read and write entry points.
#[async_trait]
pub trait ProposalRegistry: Send + Sync {
    /// Reads the registry's "next number" counter.
    async fn next_number(&self) -> Result<u64, TransportError>;

    /// Reads the record at one number. `None` when the number is unused.
    async fn get_record(&self, number: u64) -> Result<Option<RegistryRecord>, TransportError>;

    /// Reads several records in a single round trip. The result is in
    /// request order, `None` for unused numbers.
    async fn get_record_batch(
        &self,
        numbers: &[u64],
    ) -> Result<Vec<Option<RegistryRecord>>, TransportError>;

    /// Reads a record together with its append-only version history.
    async fn get_record_with_history(
        &self,
        number: u64,
    ) -> Result<Option<(RegistryRecord, Vec<ProposalVersionRecord>)>, TransportError>;

    /// Reads the live status vocabulary (id/name pairs in registration
    /// order).
    async fn get_status_vocabulary(&self) -> Result<StatusVocabulary, TransportError>;

    /// Submits a status-change request for a proposal. Enforcement happens
    /// on-chain; failures are surfaced verbatim.
    async fn request_status_change(
        &self,
        number: u64,
        new_status_name: &str,
    ) -> Result<(), TransportError>;

    /// Links an external vote identifier to a proposal.
    async fn link_external_vote(
        &self,
        number: u64,
        vote_id: &str,
    ) -> Result<(), TransportError>;

    /// Polls for registry events after the given cursor. Returns the events
    /// and the new cursor. Best-effort; correctness never depends on it.
    async fn poll_events(
        &self,
        after: u64,
    ) -> Result<(Vec<RegistryEvent>, u64), TransportError>;
}
