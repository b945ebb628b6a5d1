//! JSON-RPC wallet provider over HTTP.
//!
//! Speaks JSON-RPC 2.0 to a wallet-enabled endpoint (a local node with
//! managed accounts behaves like a browser wallet without the prompt).
//! The endpoint pushes nothing over plain HTTP, so account and chain
//! changes are detected by polling and rebroadcast as [`ProviderEvent`]s.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use alloy_primitives::{Address, Bytes};
use async_trait::async_trait;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;

use ballot_types::{Account, ChainId, TxHash};

use crate::error::ProviderError;
use crate::event::ProviderEvent;
use crate::WalletProvider;

/// Default timeout for provider requests.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default connection timeout.
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Capacity of the provider event channel.
const EVENT_CHANNEL_CAPACITY: usize = 64;

/// HTTP JSON-RPC implementation of [`WalletProvider`].
pub struct HttpProvider {
    http: reqwest::Client,
    rpc_url: String,
    request_id: AtomicU64,
    events_tx: broadcast::Sender<ProviderEvent>,
    poller: Mutex<Option<JoinHandle<()>>>,
}

impl HttpProvider {
    /// Create a new provider targeting the given JSON-RPC endpoint
    /// (e.g. `http://127.0.0.1:8545`).
    pub fn new(rpc_url: impl Into<String>) -> Result<Self, ProviderError> {
        let http = reqwest::Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .connect_timeout(DEFAULT_CONNECT_TIMEOUT)
            .build()
            .map_err(|e| ProviderError::Transport(format!("failed to create HTTP client: {e}")))?;
        let (events_tx, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Ok(Self {
            http,
            rpc_url: rpc_url.into(),
            request_id: AtomicU64::new(1),
            events_tx,
            poller: Mutex::new(None),
        })
    }

    /// The configured endpoint URL.
    pub fn rpc_url(&self) -> &str {
        &self.rpc_url
    }

    /// Send a JSON-RPC request and return the `result` field.
    async fn rpc_call(
        &self,
        method: &str,
        params: serde_json::Value,
    ) -> Result<serde_json::Value, ProviderError> {
        let id = self.request_id.fetch_add(1, Ordering::Relaxed);
        let body = serde_json::json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": method,
            "params": params,
        });

        let response = self
            .http
            .post(&self.rpc_url)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() {
                    ProviderError::Unavailable
                } else {
                    ProviderError::Transport(format!("request failed: {e}"))
                }
            })?;

        if !response.status().is_success() {
            return Err(ProviderError::Transport(format!(
                "provider returned HTTP {}",
                response.status()
            )));
        }

        let json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| ProviderError::InvalidResponse(format!("invalid JSON response: {e}")))?;

        if let Some(err) = json.get("error") {
            let code = err.get("code").and_then(|c| c.as_i64()).unwrap_or(0);
            let message = err
                .get("message")
                .and_then(|m| m.as_str())
                .unwrap_or("unknown error")
                .to_string();
            return Err(ProviderError::from_rpc(code, message));
        }

        json.get("result")
            .cloned()
            .ok_or_else(|| ProviderError::InvalidResponse("response missing result field".into()))
    }

    fn parse_accounts(result: serde_json::Value) -> Result<Vec<Account>, ProviderError> {
        let raw: Vec<String> = serde_json::from_value(result)
            .map_err(|e| ProviderError::InvalidResponse(format!("invalid accounts list: {e}")))?;
        raw.iter()
            .map(|s| {
                s.parse::<Account>()
                    .map_err(|e| ProviderError::InvalidResponse(e.to_string()))
            })
            .collect()
    }

    /// Parse a JSON-RPC quantity (`"0x..."` hex string) into a u64.
    fn parse_quantity(result: &serde_json::Value) -> Result<u64, ProviderError> {
        let raw = result
            .as_str()
            .ok_or_else(|| ProviderError::InvalidResponse("quantity is not a string".into()))?;
        let digits = raw.strip_prefix("0x").ok_or_else(|| {
            ProviderError::InvalidResponse(format!("quantity missing 0x prefix: {raw}"))
        })?;
        u64::from_str_radix(digits, 16)
            .map_err(|e| ProviderError::InvalidResponse(format!("invalid quantity {raw}: {e}")))
    }

    /// Start the background task that polls for account and chain drift.
    ///
    /// Idempotent: a second call replaces the previous poller. The first
    /// observation only seeds the baseline — events fire on change.
    pub fn start_poller(self: &Arc<Self>, interval: Duration) {
        let provider = Arc::clone(self);
        let handle = tokio::spawn(async move {
            let mut last_accounts: Option<Vec<Account>> = None;
            let mut last_chain: Option<ChainId> = None;
            loop {
                tokio::time::sleep(interval).await;

                match provider.accounts().await {
                    Ok(accounts) => {
                        if last_accounts.as_ref() != Some(&accounts) {
                            if last_accounts.is_some() {
                                tracing::debug!(count = accounts.len(), "account list changed");
                                let _ = provider
                                    .events_tx
                                    .send(ProviderEvent::AccountsChanged(accounts.clone()));
                            }
                            last_accounts = Some(accounts);
                        }
                    }
                    Err(e) => tracing::debug!("account poll failed: {e}"),
                }

                match provider.chain_id().await {
                    Ok(chain) => {
                        if last_chain != Some(chain) {
                            if last_chain.is_some() {
                                tracing::debug!(chain = chain.as_u64(), "chain changed");
                                let _ =
                                    provider.events_tx.send(ProviderEvent::ChainChanged(chain));
                            }
                            last_chain = Some(chain);
                        }
                    }
                    Err(e) => tracing::debug!("chain poll failed: {e}"),
                }
            }
        });

        let mut slot = self.poller.lock().expect("poller lock poisoned");
        if let Some(previous) = slot.replace(handle) {
            previous.abort();
        }
    }

    /// Stop the polling task, if one is running.
    pub fn stop_poller(&self) {
        let mut slot = self.poller.lock().expect("poller lock poisoned");
        if let Some(handle) = slot.take() {
            handle.abort();
        }
    }
}

impl Drop for HttpProvider {
    fn drop(&mut self) {
        self.stop_poller();
    }
}

#[async_trait]
impl WalletProvider for HttpProvider {
    async fn request_accounts(&self) -> Result<Vec<Account>, ProviderError> {
        let result = self
            .rpc_call("eth_requestAccounts", serde_json::json!([]))
            .await?;
        Self::parse_accounts(result)
    }

    async fn accounts(&self) -> Result<Vec<Account>, ProviderError> {
        let result = self.rpc_call("eth_accounts", serde_json::json!([])).await?;
        Self::parse_accounts(result)
    }

    async fn chain_id(&self) -> Result<ChainId, ProviderError> {
        let result = self.rpc_call("eth_chainId", serde_json::json!([])).await?;
        Self::parse_quantity(&result).map(ChainId::new)
    }

    async fn call(&self, to: Address, data: Bytes) -> Result<Bytes, ProviderError> {
        let params = serde_json::json!([
            { "to": to.to_string(), "data": data.to_string() },
            "latest",
        ]);
        let result = self.rpc_call("eth_call", params).await?;
        let raw = result
            .as_str()
            .ok_or_else(|| ProviderError::InvalidResponse("call output is not a string".into()))?;
        raw.parse::<Bytes>()
            .map_err(|e| ProviderError::InvalidResponse(format!("invalid call output: {e}")))
    }

    async fn send_transaction(
        &self,
        from: Account,
        to: Address,
        data: Bytes,
    ) -> Result<TxHash, ProviderError> {
        let params = serde_json::json!([{
            "from": from.to_string(),
            "to": to.to_string(),
            "data": data.to_string(),
        }]);
        let result = self.rpc_call("eth_sendTransaction", params).await?;
        let raw = result.as_str().ok_or_else(|| {
            ProviderError::InvalidResponse("transaction hash is not a string".into())
        })?;
        raw.parse::<TxHash>()
            .map_err(|e| ProviderError::InvalidResponse(format!("invalid transaction hash: {e}")))
    }

    fn subscribe(&self) -> broadcast::Receiver<ProviderEvent> {
        self.events_tx.subscribe()
    }
}
