// Path: crates/rpc/src/transport.rs

//! A load-balanced, retrying JSON-RPC 2.0 transport over multiple HTTP
//! endpoints.
//!
//! Endpoint selection rotates on every transient failure, so one bad
//! upstream only costs a retry, not the whole call. Only transient
//! failures are retried, with capped exponential backoff plus a small
//! jitter; JSON-RPC error objects and undecodable responses are returned
//! immediately.

use agora_api::transport::{RpcCall, RpcTransport};
use agora_types::error::TransportError;
use agora_types::service_configs::TransportConfig;
use async_trait::async_trait;
use rand::Rng;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::Duration;

/// Concrete [`RpcTransport`] over HTTP endpoints.
#[derive(Debug)]
pub struct HttpTransport {
    client: reqwest::Client,
    endpoints: Vec<String>,
    config: TransportConfig,
    // Rotating start index so load spreads across endpoints between calls.
    cursor: AtomicUsize,
    next_id: AtomicU64,
}

#[derive(Deserialize)]
struct RpcResponse {
    id: Option<u64>,
    result: Option<Value>,
    error: Option<RpcErrorBody>,
}

#[derive(Deserialize)]
struct RpcErrorBody {
    code: i64,
    message: String,
}

impl HttpTransport {
    /// Builds a transport from its configuration. At least one endpoint is
    /// required.
    pub fn new(config: TransportConfig) -> Result<Self, TransportError> {
        if config.endpoints.is_empty() {
            return Err(TransportError::Malformed(
                "no rpc endpoints configured".to_string(),
            ));
        }
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .build()
            .map_err(|e| TransportError::Malformed(e.to_string()))?;
        Ok(Self {
            client,
            endpoints: config.endpoints.clone(),
            config,
            cursor: AtomicUsize::new(0),
            next_id: AtomicU64::new(1),
        })
    }

    fn fresh_id(&self) -> u64 {
        self.next_id.fetch_add(1, Ordering::Relaxed)
    }

    fn endpoint(&self, attempt: usize) -> &str {
        let start = self.cursor.load(Ordering::Relaxed);
        let idx = (start + attempt) % self.endpoints.len();
        self.endpoints
            .get(idx)
            .map(String::as_str)
            .unwrap_or_default()
    }

    fn backoff_delay(&self, attempt: usize) -> Duration {
        let exp = self
            .config
            .retry_base_ms
            .saturating_mul(1u64 << attempt.min(16) as u32);
        let capped = exp.min(self.config.retry_cap_ms);
        let jitter = rand::thread_rng().gen_range(0..=capped / 4 + 1);
        Duration::from_millis(capped + jitter)
    }

    async fn post_once(&self, endpoint: &str, body: &Value) -> Result<Value, TransportError> {
        let response = self
            .client
            .post(endpoint)
            .json(body)
            .send()
            .await
            .map_err(classify_reqwest)?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS || status.is_server_error() {
            return Err(TransportError::Transient(format!(
                "{} from {}",
                status, endpoint
            )));
        }
        if !status.is_success() {
            return Err(TransportError::Malformed(format!(
                "{} from {}",
                status, endpoint
            )));
        }
        response
            .json::<Value>()
            .await
            .map_err(|e| TransportError::Malformed(e.to_string()))
    }

    /// Runs one request body against the endpoint pool with retries, then
    /// hands the raw response JSON to `interpret`.
    async fn run<T>(
        &self,
        body: Value,
        interpret: impl Fn(Value) -> Result<T, TransportError>,
    ) -> Result<T, TransportError> {
        let mut last_transient: Option<TransportError> = None;
        for attempt in 0..self.config.max_retries {
            let endpoint = self.endpoint(attempt);
            match self.post_once(endpoint, &body).await {
                Ok(raw) => return interpret(raw),
                Err(e) if e.is_transient() => {
                    tracing::debug!(attempt, endpoint, error = %e, "transient rpc failure, rotating");
                    self.cursor.fetch_add(1, Ordering::Relaxed);
                    last_transient = Some(e);
                    if attempt + 1 < self.config.max_retries {
                        tokio::time::sleep(self.backoff_delay(attempt)).await;
                    }
                }
                Err(e) => return Err(e),
            }
        }
        Err(last_transient.unwrap_or(TransportError::Exhausted(self.endpoints.len())))
    }
}

fn classify_reqwest(err: reqwest::Error) -> TransportError {
    if err.is_timeout() || err.is_connect() || err.is_request() {
        TransportError::Transient(err.to_string())
    } else {
        TransportError::Malformed(err.to_string())
    }
}

fn interpret_single(raw: Value) -> Result<Value, TransportError> {
    let parsed: RpcResponse = serde_json::from_value(raw)
        .map_err(|e| TransportError::Malformed(format!("undecodable rpc response: {}", e)))?;
    if let Some(err) = parsed.error {
        return Err(TransportError::Rpc {
            code: err.code,
            message: err.message,
        });
    }
    parsed
        .result
        .ok_or_else(|| TransportError::Malformed("response carried neither result nor error".into()))
}

#[async_trait]
impl RpcTransport for HttpTransport {
    async fn call(&self, method: &str, params: Value) -> Result<Value, TransportError> {
        let body = json!({
            "jsonrpc": "2.0",
            "id": self.fresh_id(),
            "method": method,
            "params": params,
        });
        self.run(body, interpret_single).await
    }

    async fn call_batch(
        &self,
        calls: &[RpcCall],
    ) -> Result<Vec<Result<Value, TransportError>>, TransportError> {
        if calls.is_empty() {
            return Ok(Vec::new());
        }
        let first_id = self.next_id.fetch_add(calls.len() as u64, Ordering::Relaxed);
        let body: Value = calls
            .iter()
            .enumerate()
            .map(|(i, c)| {
                json!({
                    "jsonrpc": "2.0",
                    "id": first_id + i as u64,
                    "method": c.method,
                    "params": c.params,
                })
            })
            .collect::<Vec<_>>()
            .into();

        let count = calls.len();
        self.run(body, move |raw| {
            let entries: Vec<RpcResponse> = serde_json::from_value(raw).map_err(|e| {
                TransportError::Malformed(format!("undecodable batch response: {}", e))
            })?;
            // Responses may arrive in any order; match them back by id.
            let mut out: Vec<Result<Value, TransportError>> = (0..count)
                .map(|_| {
                    Err(TransportError::Malformed(
                        "missing batch response entry".to_string(),
                    ))
                })
                .collect();
            for entry in entries {
                let Some(slot) = entry
                    .id
                    .and_then(|id| id.checked_sub(first_id))
                    .map(|o| o as usize)
                    .filter(|o| *o < count)
                else {
                    continue;
                };
                let value = match entry.error {
                    Some(err) => Err(TransportError::Rpc {
                        code: err.code,
                        message: err.message,
                    }),
                    None => entry.result.ok_or_else(|| {
                        TransportError::Malformed(
                            "response carried neither result nor error".to_string(),
                        )
                    }),
                };
                if let Some(target) = out.get_mut(slot) {
                    *target = value;
                }
            }
            Ok(out)
        })
        .await
    }
}
