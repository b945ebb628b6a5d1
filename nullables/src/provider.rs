//! Nullable wallet provider — record calls, answer from scripts.

use std::collections::VecDeque;
use std::sync::Mutex;

use alloy_primitives::{Address, Bytes, B256};
use async_trait::async_trait;
use tokio::sync::broadcast;

use ballot_provider::{ProviderError, ProviderEvent, WalletProvider};
use ballot_types::{Account, ChainId, TxHash};

/// Capacity of the test event channel.
const EVENT_CHANNEL_CAPACITY: usize = 64;

/// One provider call, as observed by the nullable.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RecordedCall {
    RequestAccounts,
    Accounts,
    ChainId,
    Call { to: Address, data: Bytes },
    SendTransaction { from: Account, to: Address, data: Bytes },
}

/// A test provider that records calls instead of talking to a wallet.
///
/// Responses come from per-method queues pushed by the test; when a queue
/// is empty the provider falls back to a deterministic default (the
/// configured account list, an all-zero tally, a fixed transaction hash).
/// Events are emitted programmatically via [`NullProvider::emit`].
pub struct NullProvider {
    accounts: Mutex<Vec<Account>>,
    chain: Mutex<ChainId>,
    request_responses: Mutex<VecDeque<Result<Vec<Account>, ProviderError>>>,
    call_responses: Mutex<VecDeque<Result<Bytes, ProviderError>>>,
    send_responses: Mutex<VecDeque<Result<TxHash, ProviderError>>>,
    recorded: Mutex<Vec<RecordedCall>>,
    events_tx: broadcast::Sender<ProviderEvent>,
}

impl NullProvider {
    pub fn new() -> Self {
        let (events_tx, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            accounts: Mutex::new(Vec::new()),
            chain: Mutex::new(ChainId::MAINNET),
            request_responses: Mutex::new(VecDeque::new()),
            call_responses: Mutex::new(VecDeque::new()),
            send_responses: Mutex::new(VecDeque::new()),
            recorded: Mutex::new(Vec::new()),
            events_tx,
        }
    }

    /// A provider with one pre-authorized account.
    pub fn with_account(account: Account) -> Self {
        let provider = Self::new();
        provider.set_accounts(vec![account]);
        provider
    }

    /// Set the authorized account list returned by `accounts()` and, when
    /// no scripted response is queued, by `request_accounts()`.
    pub fn set_accounts(&self, accounts: Vec<Account>) {
        *self.accounts.lock().unwrap() = accounts;
    }

    /// Set the chain reported by `chain_id()`.
    pub fn set_chain(&self, chain: ChainId) {
        *self.chain.lock().unwrap() = chain;
    }

    /// Queue a response for the next `request_accounts()` call.
    pub fn push_request_response(&self, response: Result<Vec<Account>, ProviderError>) {
        self.request_responses.lock().unwrap().push_back(response);
    }

    /// Queue a response for the next `call()`.
    pub fn push_call_response(&self, response: Result<Bytes, ProviderError>) {
        self.call_responses.lock().unwrap().push_back(response);
    }

    /// Queue a response for the next `send_transaction()`.
    pub fn push_send_response(&self, response: Result<TxHash, ProviderError>) {
        self.send_responses.lock().unwrap().push_back(response);
    }

    /// Deliver an event to all subscribers.
    pub fn emit(&self, event: ProviderEvent) {
        let _ = self.events_tx.send(event);
    }

    /// Get all recorded calls (for assertions).
    pub fn recorded(&self) -> Vec<RecordedCall> {
        self.recorded.lock().unwrap().clone()
    }

    /// Number of `send_transaction` calls observed.
    pub fn sent_count(&self) -> usize {
        self.recorded()
            .iter()
            .filter(|call| matches!(call, RecordedCall::SendTransaction { .. }))
            .count()
    }

    /// Number of read-only `call`s observed.
    pub fn call_count(&self) -> usize {
        self.recorded()
            .iter()
            .filter(|call| matches!(call, RecordedCall::Call { .. }))
            .count()
    }

    fn record(&self, call: RecordedCall) {
        self.recorded.lock().unwrap().push(call);
    }
}

impl Default for NullProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl WalletProvider for NullProvider {
    async fn request_accounts(&self) -> Result<Vec<Account>, ProviderError> {
        self.record(RecordedCall::RequestAccounts);
        match self.request_responses.lock().unwrap().pop_front() {
            Some(response) => response,
            None => Ok(self.accounts.lock().unwrap().clone()),
        }
    }

    async fn accounts(&self) -> Result<Vec<Account>, ProviderError> {
        self.record(RecordedCall::Accounts);
        Ok(self.accounts.lock().unwrap().clone())
    }

    async fn chain_id(&self) -> Result<ChainId, ProviderError> {
        self.record(RecordedCall::ChainId);
        Ok(*self.chain.lock().unwrap())
    }

    async fn call(&self, to: Address, data: Bytes) -> Result<Bytes, ProviderError> {
        self.record(RecordedCall::Call { to, data });
        match self.call_responses.lock().unwrap().pop_front() {
            Some(response) => response,
            // ABI encoding of (0, 0): two zeroed 32-byte words.
            None => Ok(Bytes::from(vec![0u8; 64])),
        }
    }

    async fn send_transaction(
        &self,
        from: Account,
        to: Address,
        data: Bytes,
    ) -> Result<TxHash, ProviderError> {
        self.record(RecordedCall::SendTransaction { from, to, data });
        match self.send_responses.lock().unwrap().pop_front() {
            Some(response) => response,
            None => Ok(TxHash::new(B256::repeat_byte(0xab))),
        }
    }

    fn subscribe(&self) -> broadcast::Receiver<ProviderEvent> {
        self.events_tx.subscribe()
    }
}
