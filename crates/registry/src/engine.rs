// Path: crates/registry/src/engine.rs

//! The registry sync engine.
//!
//! The registry exposes only a "next number" counter and per-number
//! lookups, so listing proposals means discovering the candidate number
//! range, reading it in small batches (one multi-call round trip each),
//! and merging every populated record with its content-addressed body.
//! Failures shrink the result set instead of aborting it: a record whose
//! content cannot be fetched is skipped, and a failed batch skips only
//! that batch.

use std::sync::Arc;
use std::time::Duration;

use agora_api::content::ContentStore;
use agora_api::registry::ProposalRegistry;
use agora_content::ContentPipeline;
use agora_types::app::{
    Proposal, ProposalFilter, ProposalVersionRecord, RegistryEvent, RegistryRecord,
    StatusVocabulary,
};
use agora_types::error::SyncError;
use agora_types::service_configs::SyncConfig;
use futures_util::future::join_all;

/// The synchronization engine over one registry deployment.
pub struct RegistrySyncEngine<R: ?Sized, S: ?Sized> {
    registry: Arc<R>,
    pipeline: ContentPipeline<S>,
    config: SyncConfig,
}

impl<R, S> RegistrySyncEngine<R, S>
where
    R: ProposalRegistry + ?Sized,
    S: ContentStore + ?Sized,
{
    /// Builds an engine over shared, long-lived collaborators.
    pub fn new(registry: Arc<R>, pipeline: ContentPipeline<S>, config: SyncConfig) -> Self {
        Self {
            registry,
            pipeline,
            config,
        }
    }

    /// Resolves the live status vocabulary, degrading to the fixed
    /// fallback snapshot when the read fails.
    pub async fn resolve_vocabulary(&self) -> StatusVocabulary {
        match self.registry.get_status_vocabulary().await {
            Ok(vocab) if !vocab.entries.is_empty() => vocab,
            Ok(_) => {
                tracing::warn!("registry returned an empty status vocabulary, using fallback");
                crate::status::fallback_vocabulary()
            }
            Err(e) => {
                tracing::warn!(error = %e, "status vocabulary read failed, using fallback");
                crate::status::fallback_vocabulary()
            }
        }
    }

    /// Discovers the candidate proposal numbers.
    ///
    /// Boundary-inclusion rule: for a counter value `n` the candidates are
    /// `[start_number, n - 1]`; `n` itself is included only when the record
    /// at `n` already exists and is non-empty, compensating for an
    /// off-by-one in counter advancement. When the counter read fails, the
    /// configured static bound is used instead: `[start_number,
    /// fallback_upper_bound]` inclusive.
    pub async fn discover_candidates(&self) -> Vec<u64> {
        let start = self.config.start_number;
        match self.registry.next_number().await {
            Ok(counter) => {
                let mut end = counter; // exclusive
                match self.registry.get_record(counter).await {
                    Ok(Some(record)) if !record.is_empty() => {
                        tracing::debug!(counter, "boundary record populated, including it");
                        end = counter.saturating_add(1);
                    }
                    Ok(_) => {}
                    Err(e) => {
                        tracing::debug!(counter, error = %e, "boundary probe failed, excluding it")
                    }
                }
                (start..end).collect()
            }
            Err(e) => {
                tracing::warn!(error = %e, "counter read failed, falling back to static bound");
                (start..=self.config.fallback_upper_bound).collect()
            }
        }
    }

    /// Lists every discoverable proposal, merged with its content and
    /// optionally filtered. Partial failures shrink the list rather than
    /// failing it.
    pub async fn list_proposals(
        &self,
        filter: Option<&ProposalFilter>,
    ) -> Result<Vec<Proposal>, SyncError> {
        let vocabulary = self.resolve_vocabulary().await;
        let candidates = self.discover_candidates().await;

        let mut proposals = Vec::with_capacity(candidates.len());
        for (batch_index, batch) in candidates.chunks(self.config.batch_size.max(1)).enumerate() {
            if batch_index > 0 {
                tokio::time::sleep(self.batch_delay(batch_index)).await;
            }

            let records = match self.registry.get_record_batch(batch).await {
                Ok(records) => records,
                Err(e) => {
                    tracing::warn!(?batch, error = %e, "batch read failed, skipping batch");
                    continue;
                }
            };

            // Content fetches within a batch are independent reads and run
            // concurrently; batches themselves stay strictly sequential.
            let merges = records
                .into_iter()
                .flatten()
                .filter(|r| !r.is_empty())
                .map(|record| self.merge(record, &vocabulary));
            for merged in join_all(merges).await {
                match merged {
                    Ok(proposal) => proposals.push(proposal),
                    Err((number, e)) => {
                        tracing::warn!(number, error = %e, "content merge failed, skipping record");
                    }
                }
            }
        }

        if let Some(filter) = filter {
            proposals.retain(|p| filter.matches(p));
        }
        Ok(proposals)
    }

    /// Reads and merges one proposal.
    pub async fn get_proposal(&self, number: u64) -> Result<Proposal, SyncError> {
        let vocabulary = self.resolve_vocabulary().await;
        let record = self
            .registry
            .get_record(number)
            .await?
            .filter(|r| !r.is_empty())
            .ok_or(SyncError::NotFound(number))?;
        self.merge(record, &vocabulary).await.map_err(|(_, e)| e)
    }

    /// Reads and merges one proposal together with its version history.
    pub async fn get_proposal_with_history(
        &self,
        number: u64,
    ) -> Result<(Proposal, Vec<ProposalVersionRecord>), SyncError> {
        let vocabulary = self.resolve_vocabulary().await;
        let (record, history) = self
            .registry
            .get_record_with_history(number)
            .await?
            .filter(|(r, _)| !r.is_empty())
            .ok_or(SyncError::NotFound(number))?;

        let proposal = self.merge(record, &vocabulary).await.map_err(|(_, e)| e)?;
        if proposal.version as usize != history.len() {
            tracing::warn!(
                number,
                version = proposal.version,
                history_len = history.len(),
                "version counter disagrees with history length"
            );
        }
        Ok((proposal, history))
    }

    /// Links an external vote identifier to a proposal.
    pub async fn link_external_vote(&self, number: u64, vote_id: &str) -> Result<(), SyncError> {
        self.registry
            .link_external_vote(number, vote_id)
            .await
            .map_err(SyncError::from)
    }

    /// Polls registry events after a cursor, for callers that invalidate
    /// their own views optimistically. Best-effort only.
    pub async fn events(&self, after: u64) -> Result<(Vec<RegistryEvent>, u64), SyncError> {
        self.registry.poll_events(after).await.map_err(SyncError::from)
    }

    fn batch_delay(&self, batch_index: usize) -> Duration {
        let linear = self
            .config
            .batch_delay_ms
            .saturating_mul(batch_index as u64);
        Duration::from_millis(linear.min(self.config.batch_delay_cap_ms))
    }

    async fn merge(
        &self,
        record: RegistryRecord,
        vocabulary: &StatusVocabulary,
    ) -> Result<Proposal, (u64, SyncError)> {
        let number = record.number;
        let document = self
            .pipeline
            .fetch_and_parse(&record.storage_address)
            .await
            .map_err(|e| (number, SyncError::from(e)))?;

        match ContentPipeline::<S>::compute_content_hash(&document) {
            Ok(hash) if hash != record.content_hash => {
                tracing::warn!(
                    number,
                    on_chain = %record.content_hash,
                    computed = %hash,
                    "stored content hash does not match fetched body"
                );
            }
            Ok(_) => {}
            Err(e) => tracing::warn!(number, error = %e, "could not hash fetched body"),
        }

        let status_name = vocabulary
            .name_of(&record.status)
            .unwrap_or("unknown")
            .to_string();

        Ok(Proposal {
            number,
            title: record.title,
            chain: record.chain,
            author: record.author,
            implementor: record.implementor,
            status: record.status,
            status_name,
            content_hash: record.content_hash,
            storage_address: record.storage_address,
            created_at: record.created_at,
            updated_at: record.updated_at,
            version: record.version,
            external_vote_id: record.external_vote_id,
            document,
        })
    }
}
