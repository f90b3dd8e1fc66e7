// Path: crates/rpc/src/registry.rs

//! The typed proposal-registry client.
//!
//! Maps the registry contract's entry points onto namespaced JSON-RPC
//! methods over any [`RpcTransport`]. Multi-record reads go out as one
//! JSON-RPC batch request — a single round trip for the whole group.

use agora_api::registry::ProposalRegistry;
use agora_api::transport::{RpcCall, RpcTransport};
use agora_types::app::{
    ProposalVersionRecord, RegistryEvent, RegistryRecord, StatusDefinition, StatusId,
    StatusVocabulary,
};
use agora_types::error::TransportError;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

const METHOD_NEXT_NUMBER: &str = "registry_nextNumber";
const METHOD_GET_RECORD: &str = "registry_getRecord";
const METHOD_GET_RECORD_WITH_HISTORY: &str = "registry_getRecordWithHistory";
const METHOD_GET_STATUS_VOCABULARY: &str = "registry_getStatusVocabulary";
const METHOD_REQUEST_STATUS_CHANGE: &str = "registry_requestStatusChange";
const METHOD_LINK_EXTERNAL_VOTE: &str = "registry_linkExternalVote";
const METHOD_GET_EVENTS: &str = "registry_getEvents";

/// [`ProposalRegistry`] over a shared transport.
pub struct RegistryClient<T: ?Sized> {
    transport: Arc<T>,
}

impl<T: ?Sized> Clone for RegistryClient<T> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
        }
    }
}

#[derive(Deserialize)]
struct RecordWithHistory {
    record: RegistryRecord,
    history: Vec<ProposalVersionRecord>,
}

#[derive(Deserialize)]
struct VocabularyResponse {
    ids: Vec<StatusId>,
    names: Vec<String>,
}

#[derive(Deserialize)]
struct EventsResponse {
    events: Vec<RegistryEvent>,
    cursor: u64,
}

impl<T: RpcTransport + ?Sized> RegistryClient<T> {
    /// Wraps a long-lived transport.
    pub fn new(transport: Arc<T>) -> Self {
        Self { transport }
    }

    fn decode<D: serde::de::DeserializeOwned>(value: Value) -> Result<D, TransportError> {
        serde_json::from_value(value).map_err(|e| TransportError::Malformed(e.to_string()))
    }

    fn decode_optional_record(value: Value) -> Result<Option<RegistryRecord>, TransportError> {
        if value.is_null() {
            return Ok(None);
        }
        Ok(Some(Self::decode(value)?))
    }
}

#[async_trait]
impl<T: RpcTransport + ?Sized> ProposalRegistry for RegistryClient<T> {
    async fn next_number(&self) -> Result<u64, TransportError> {
        let value = self.transport.call(METHOD_NEXT_NUMBER, json!([])).await?;
        Self::decode(value)
    }

    async fn get_record(&self, number: u64) -> Result<Option<RegistryRecord>, TransportError> {
        let value = self
            .transport
            .call(METHOD_GET_RECORD, json!([number]))
            .await?;
        Self::decode_optional_record(value)
    }

    async fn get_record_batch(
        &self,
        numbers: &[u64],
    ) -> Result<Vec<Option<RegistryRecord>>, TransportError> {
        let calls: Vec<RpcCall> = numbers
            .iter()
            .map(|n| RpcCall::new(METHOD_GET_RECORD, json!([n])))
            .collect();
        let results = self.transport.call_batch(&calls).await?;
        results
            .into_iter()
            .map(|r| Self::decode_optional_record(r?))
            .collect()
    }

    async fn get_record_with_history(
        &self,
        number: u64,
    ) -> Result<Option<(RegistryRecord, Vec<ProposalVersionRecord>)>, TransportError> {
        let value = self
            .transport
            .call(METHOD_GET_RECORD_WITH_HISTORY, json!([number]))
            .await?;
        if value.is_null() {
            return Ok(None);
        }
        let decoded: RecordWithHistory = Self::decode(value)?;
        Ok(Some((decoded.record, decoded.history)))
    }

    async fn get_status_vocabulary(&self) -> Result<StatusVocabulary, TransportError> {
        let value = self
            .transport
            .call(METHOD_GET_STATUS_VOCABULARY, json!([]))
            .await?;
        let decoded: VocabularyResponse = Self::decode(value)?;
        if decoded.ids.len() != decoded.names.len() {
            return Err(TransportError::Malformed(format!(
                "vocabulary arrays disagree: {} ids, {} names",
                decoded.ids.len(),
                decoded.names.len()
            )));
        }
        let entries = decoded
            .ids
            .into_iter()
            .zip(decoded.names)
            .enumerate()
            .map(|(order, (id, name))| StatusDefinition {
                id,
                name,
                order: order as u32,
            })
            .collect();
        Ok(StatusVocabulary { entries })
    }

    async fn request_status_change(
        &self,
        number: u64,
        new_status_name: &str,
    ) -> Result<(), TransportError> {
        self.transport
            .call(METHOD_REQUEST_STATUS_CHANGE, json!([number, new_status_name]))
            .await?;
        Ok(())
    }

    async fn link_external_vote(&self, number: u64, vote_id: &str) -> Result<(), TransportError> {
        self.transport
            .call(METHOD_LINK_EXTERNAL_VOTE, json!([number, vote_id]))
            .await?;
        Ok(())
    }

    async fn poll_events(&self, after: u64) -> Result<(Vec<RegistryEvent>, u64), TransportError> {
        let value = self.transport.call(METHOD_GET_EVENTS, json!([after])).await?;
        let decoded: EventsResponse = Self::decode(value)?;
        Ok((decoded.events, decoded.cursor))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agora_types::app::{Address, ContentHash, StorageAddress};
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Transport stub answering from a method+params table.
    #[derive(Default)]
    struct TableTransport {
        answers: Mutex<HashMap<String, Value>>,
    }

    impl TableTransport {
        fn set(&self, method: &str, params: Value, answer: Value) {
            self.answers
                .lock()
                .unwrap()
                .insert(format!("{}{}", method, params), answer);
        }

        fn lookup(&self, method: &str, params: &Value) -> Result<Value, TransportError> {
            self.answers
                .lock()
                .unwrap()
                .get(&format!("{}{}", method, params))
                .cloned()
                .ok_or_else(|| TransportError::Rpc {
                    code: -32601,
                    message: format!("no answer for {}", method),
                })
        }
    }

    #[async_trait]
    impl RpcTransport for TableTransport {
        async fn call(&self, method: &str, params: Value) -> Result<Value, TransportError> {
            self.lookup(method, &params)
        }

        async fn call_batch(
            &self,
            calls: &[RpcCall],
        ) -> Result<Vec<Result<Value, TransportError>>, TransportError> {
            Ok(calls
                .iter()
                .map(|c| self.lookup(&c.method, &c.params))
                .collect())
        }
    }

    fn record_json(number: u64) -> Value {
        serde_json::to_value(RegistryRecord {
            number,
            title: format!("Proposal {}", number),
            chain: "gnosis".into(),
            author: Address::parse("0x00000000000000000000000000000000000000aa").unwrap(),
            implementor: "core".into(),
            status: StatusId::derive("draft"),
            content_hash: ContentHash([7u8; 32]),
            storage_address: StorageAddress(format!("Qm{}", number)),
            created_at: 1_700_000_000,
            updated_at: 1_700_000_000,
            version: 1,
            external_vote_id: None,
        })
        .unwrap()
    }

    #[tokio::test]
    async fn batch_reads_preserve_order_and_nulls() {
        let transport = Arc::new(TableTransport::default());
        transport.set(METHOD_GET_RECORD, json!([209]), record_json(209));
        transport.set(METHOD_GET_RECORD, json!([210]), Value::Null);
        transport.set(METHOD_GET_RECORD, json!([211]), record_json(211));

        let client = RegistryClient::new(transport);
        let records = client.get_record_batch(&[209, 210, 211]).await.unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].as_ref().unwrap().number, 209);
        assert!(records[1].is_none());
        assert_eq!(records[2].as_ref().unwrap().number, 211);
    }

    #[tokio::test]
    async fn vocabulary_zips_ids_and_names_in_order() {
        let transport = Arc::new(TableTransport::default());
        transport.set(
            METHOD_GET_STATUS_VOCABULARY,
            json!([]),
            json!({
                "ids": [StatusId::derive("draft"), StatusId::derive("posted")],
                "names": ["draft", "posted"],
            }),
        );
        let client = RegistryClient::new(transport);
        let vocab = client.get_status_vocabulary().await.unwrap();
        assert_eq!(vocab.entries.len(), 2);
        assert_eq!(vocab.entries[1].name, "posted");
        assert_eq!(vocab.entries[1].order, 1);
    }

    #[tokio::test]
    async fn mismatched_vocabulary_arrays_are_malformed() {
        let transport = Arc::new(TableTransport::default());
        transport.set(
            METHOD_GET_STATUS_VOCABULARY,
            json!([]),
            json!({"ids": [StatusId::derive("draft")], "names": []}),
        );
        let client = RegistryClient::new(transport);
        assert!(matches!(
            client.get_status_vocabulary().await.unwrap_err(),
            TransportError::Malformed(_)
        ));
    }
}
