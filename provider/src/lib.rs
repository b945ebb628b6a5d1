//! Wallet provider boundary.
//!
//! The provider is the external interface granting access to blockchain
//! accounts, contract calls, and network-change notifications. It is
//! modeled as an injected capability so the rest of the client can run
//! against a deterministic stand-in in tests.

pub mod error;
pub mod event;
pub mod http;

use alloy_primitives::{Address, Bytes};
use async_trait::async_trait;
use tokio::sync::broadcast;

use ballot_types::{Account, ChainId, TxHash};

pub use error::ProviderError;
pub use event::ProviderEvent;
pub use http::HttpProvider;

/// Capability interface to a wallet provider.
///
/// The client never reconfigures the provider; it only issues requests
/// and subscribes to notifications. Dropping an event receiver releases
/// its subscription on every exit path.
#[async_trait]
pub trait WalletProvider: Send + Sync {
    /// Request account authorization from the user (`eth_requestAccounts`).
    async fn request_accounts(&self) -> Result<Vec<Account>, ProviderError>;

    /// Accounts already authorized for this client (`eth_accounts`).
    async fn accounts(&self) -> Result<Vec<Account>, ProviderError>;

    /// The chain the provider is currently connected to (`eth_chainId`).
    async fn chain_id(&self) -> Result<ChainId, ProviderError>;

    /// Read-only contract call (`eth_call`). Needs no account.
    async fn call(&self, to: Address, data: Bytes) -> Result<Bytes, ProviderError>;

    /// State-changing contract call attributed to `from`
    /// (`eth_sendTransaction`). Returns the transaction hash.
    async fn send_transaction(
        &self,
        from: Account,
        to: Address,
        data: Bytes,
    ) -> Result<TxHash, ProviderError>;

    /// Subscribe to account and chain change notifications.
    fn subscribe(&self) -> broadcast::Receiver<ProviderEvent>;
}
