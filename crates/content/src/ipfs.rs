// Path: crates/content/src/ipfs.rs

//! A [`ContentStore`] backed by the IPFS HTTP API (a local node or a
//! pinning service exposing the same surface).

use agora_api::content::{ContentStore, PutMetadata};
use agora_types::app::StorageAddress;
use agora_types::error::StoreError;
use agora_types::service_configs::ContentConfig;
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

/// Client over `/api/v0/add` and `/api/v0/cat`.
pub struct IpfsHttpStore {
    client: reqwest::Client,
    api_url: String,
}

#[derive(Deserialize)]
struct AddResponse {
    #[serde(rename = "Hash")]
    hash: String,
}

impl IpfsHttpStore {
    /// Builds a store client from its configuration.
    pub fn new(config: &ContentConfig) -> Result<Self, StoreError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .build()
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        Ok(Self {
            client,
            api_url: config.api_url.trim_end_matches('/').to_string(),
        })
    }

    fn classify(err: reqwest::Error) -> StoreError {
        if err.is_timeout() || err.is_connect() || err.is_request() {
            StoreError::Transient(err.to_string())
        } else {
            StoreError::Backend(err.to_string())
        }
    }

    async fn classify_status(response: reqwest::Response) -> StoreError {
        let status = response.status();
        let message = response.text().await.unwrap_or_default();
        if status == reqwest::StatusCode::NOT_FOUND
            || message.to_ascii_lowercase().contains("not found")
        {
            return StoreError::NotFound;
        }
        if status.is_server_error() {
            StoreError::Transient(format!("{}: {}", status, message))
        } else {
            StoreError::Backend(format!("{}: {}", status, message))
        }
    }
}

#[async_trait]
impl ContentStore for IpfsHttpStore {
    async fn put(
        &self,
        bytes: &[u8],
        metadata: &PutMetadata,
    ) -> Result<StorageAddress, StoreError> {
        let name = metadata.name.clone().unwrap_or_else(|| "body.md".to_string());
        let part = reqwest::multipart::Part::bytes(bytes.to_vec()).file_name(name);
        let form = reqwest::multipart::Form::new().part("file", part);

        let response = self
            .client
            .post(format!(
                "{}/api/v0/add?cid-version=0&pin={}",
                self.api_url, metadata.pin
            ))
            .multipart(form)
            .send()
            .await
            .map_err(Self::classify)?;
        if !response.status().is_success() {
            return Err(Self::classify_status(response).await);
        }
        let added: AddResponse = response
            .json()
            .await
            .map_err(|e| StoreError::Backend(format!("unexpected add response: {}", e)))?;
        Ok(StorageAddress(added.hash))
    }

    async fn get(&self, address: &StorageAddress) -> Result<Vec<u8>, StoreError> {
        let response = self
            .client
            .post(format!("{}/api/v0/cat?arg={}", self.api_url, address.0))
            .send()
            .await
            .map_err(Self::classify)?;
        if !response.status().is_success() {
            return Err(Self::classify_status(response).await);
        }
        let bytes = response.bytes().await.map_err(Self::classify)?;
        Ok(bytes.to_vec())
    }

    fn compute_address(&self, bytes: &[u8]) -> StorageAddress {
        crate::cid::compute(bytes)
    }
}
