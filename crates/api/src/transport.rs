// Path: crates/api/src/transport.rs

//! The JSON-RPC transport seam.

use agora_types::error::TransportError;
use async_trait::async_trait;
use serde_json::Value;

/// One method invocation inside a batched round trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RpcCall {
    /// The JSON-RPC method name.
    pub method: String,
    /// The positional or named parameters.
    pub params: Value,
}

impl RpcCall {
    /// Convenience constructor.
    pub fn new(method: impl Into<String>, params: Value) -> Self {
        Self {
            method: method.into(),
            params,
        }
    }
}

/// A load-balanced, retrying JSON-RPC transport over one or more upstream
/// endpoints.
///
/// Implementations are long-lived, shared, read-mostly objects: they hold no
/// per-proposal mutable state, so callers may clone an `Arc` of one freely.
/// Cancellation is cooperative; dropping a call future abandons the request
/// and its eventual result is discarded.
#[async_trait]
pub trait RpcTransport: Send + Sync {
    /// Performs a single JSON-RPC call and returns its `result` value.
    async fn call(&self, method: &str, params: Value) -> Result<Value, TransportError>;

    /// Performs several independent calls in one round trip.
    ///
    /// The outer `Result` is a transport-level failure (nothing was
    /// answered); the inner results are per-call outcomes in request order.
    async fn call_batch(
        &self,
        calls: &[RpcCall],
    ) -> Result<Vec<Result<Value, TransportError>>, TransportError>;
}
