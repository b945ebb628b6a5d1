//! The UI-facing state machine over session and gateway.

use std::sync::Arc;

use alloy_primitives::U256;
use tokio::sync::broadcast;

use ballot_gateway::ContractGateway;
use ballot_provider::{ProviderEvent, WalletProvider};
use ballot_session::WalletSession;
use ballot_types::{Account, Candidate, CandidateId, ChainId, Tally, TxReceipt, TxState};

use crate::config::ClientConfig;
use crate::error::ClientError;

/// Where the client is in its connection lifecycle.
///
/// Failures never park the machine in `Connecting` or `Voting`: the phase
/// always returns to the last stable interactive value (`Idle` after a
/// failed connect, `Connected` after a failed vote) with the error
/// recorded alongside.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Connecting,
    Connected,
    Voting,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Connecting => "connecting",
            Self::Connected => "connected",
            Self::Voting => "voting",
        }
    }
}

/// Composes the wallet session and contract gateway into the state the
/// view renders directly.
///
/// All provider interaction is suspension-based; external notifications
/// are applied between intents via the `on_accounts_changed` and
/// `on_chain_changed` handlers, with the most recent notification always
/// winning. Every session/gateway error is mapped to [`ClientError`]
/// before it is stored — nothing rawer crosses this boundary.
pub struct VotingViewModel {
    session: WalletSession,
    gateway: Option<ContractGateway>,
    phase: Phase,
    candidates: [Candidate; 2],
    tx_state: TxState,
    last_error: Option<ClientError>,
}

impl VotingViewModel {
    pub fn new(provider: Option<Arc<dyn WalletProvider>>, config: &ClientConfig) -> Self {
        let gateway = provider.as_ref().map(|p| {
            ContractGateway::new(Arc::clone(p), config.contract_address, config.chain_id)
        });
        Self {
            session: WalletSession::new(provider),
            gateway,
            phase: Phase::Idle,
            candidates: [
                Candidate::new(CandidateId::A, config.candidate_a.clone()),
                Candidate::new(CandidateId::B, config.candidate_b.clone()),
            ],
            tx_state: TxState::Idle,
            last_error: None,
        }
    }

    // ── Intents ────────────────────────────────────────────────────────

    /// Silently resume a previously authorized session, if any.
    ///
    /// Run once before the first intent; never prompts and never records
    /// an error when nothing is authorized.
    pub async fn on_startup(&mut self) {
        if self.session.resume().await.is_some() {
            self.enter_connected().await;
        }
    }

    /// The user asked to connect a wallet.
    pub async fn on_connect_intent(&mut self) {
        if self.phase != Phase::Idle {
            tracing::debug!(phase = self.phase.as_str(), "connect intent ignored");
            return;
        }
        self.last_error = None;
        self.set_phase(Phase::Connecting);

        // Resume silently when the provider already trusts us; only an
        // unauthorized session gets the prompt.
        let result = match self.session.resume().await {
            Some(account) => Ok(account),
            None => self.session.connect().await,
        };
        match result {
            Ok(_) => self.enter_connected().await,
            Err(e) => {
                self.fail(e.into());
                self.set_phase(Phase::Idle);
            }
        }
    }

    /// The user asked to disconnect.
    pub fn on_disconnect_intent(&mut self) {
        self.session.disconnect();
        self.reset_to_idle();
    }

    /// The user asked to vote for `candidate`.
    ///
    /// Only valid while connected; a second intent while a vote is in
    /// flight is a no-op, which is what keeps at most one write pending.
    pub async fn on_vote_intent(&mut self, candidate: CandidateId) {
        if self.phase == Phase::Voting {
            tracing::debug!("vote intent ignored: a vote is already in flight");
            return;
        }
        if self.phase != Phase::Connected {
            tracing::debug!(phase = self.phase.as_str(), "vote intent ignored: not connected");
            return;
        }
        let Some(account) = self.session.current_account() else {
            tracing::debug!("vote intent ignored: no account");
            return;
        };

        self.last_error = None;
        self.set_phase(Phase::Voting);
        self.tx_state = TxState::Pending;

        match self.submit_vote(candidate, account).await {
            Ok(receipt) => {
                self.tx_state = TxState::Confirmed(receipt);
                // Exactly one tally refresh between the write completing
                // and the Voting phase being left.
                match self.fetch_tally().await {
                    Ok(tally) => self.apply_tally(tally),
                    Err(e) => self.fail(e),
                }
            }
            Err(e) => {
                self.tx_state = TxState::Failed(e.to_string());
                self.fail(e);
            }
        }
        self.set_phase(Phase::Connected);
    }

    // ── External notifications ─────────────────────────────────────────

    /// The provider's account list changed.
    ///
    /// An empty list forces `Idle` from any phase. A new account re-runs
    /// the connected entry sequence; the most recent notification wins.
    pub async fn on_accounts_changed(&mut self, accounts: Vec<Account>) {
        let previous = self.session.current_account();
        match self.session.apply_account_change(&accounts) {
            None => self.reset_to_idle(),
            Some(account) if previous != Some(account) => self.enter_connected().await,
            Some(_) => {}
        }
    }

    /// The provider switched networks.
    ///
    /// Contract addresses are network-scoped, so dependent state is
    /// reloaded: a mismatch is surfaced and blocks writes, a return to
    /// the configured chain clears it and refreshes the tally.
    pub async fn on_chain_changed(&mut self, chain: ChainId) {
        if !self.session.is_connected() || self.phase != Phase::Connected {
            tracing::debug!(chain = chain.as_u64(), "chain change noted while not connected");
            return;
        }
        let expected = match self.gateway.as_ref() {
            Some(gateway) => gateway.chain(),
            None => return,
        };
        if chain != expected {
            self.fail(ClientError::ChainMismatch {
                expected,
                actual: chain,
            });
            return;
        }
        self.last_error = None;
        match self.fetch_tally().await {
            Ok(tally) => self.apply_tally(tally),
            Err(e) => self.fail(e),
        }
    }

    // ── View state ─────────────────────────────────────────────────────

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Both candidates, in tally order, with their last observed counts.
    pub fn candidates(&self) -> &[Candidate; 2] {
        &self.candidates
    }

    pub fn account(&self) -> Option<Account> {
        self.session.current_account()
    }

    pub fn tx_state(&self) -> &TxState {
        &self.tx_state
    }

    pub fn last_error(&self) -> Option<&ClientError> {
        self.last_error.as_ref()
    }

    /// The last observed tally, in (A, B) order.
    pub fn tally(&self) -> Tally {
        Tally::new(self.candidates[0].vote_count, self.candidates[1].vote_count)
    }

    pub fn has_provider(&self) -> bool {
        self.session.has_provider()
    }

    /// Subscribe to provider notifications, for the view's event loop.
    pub fn events(&self) -> Result<broadcast::Receiver<ProviderEvent>, ClientError> {
        self.session.events().map_err(ClientError::from)
    }

    // ── Internals ──────────────────────────────────────────────────────

    async fn enter_connected(&mut self) {
        self.set_phase(Phase::Connected);
        match self.refresh_chain_and_tally().await {
            Ok(tally) => self.apply_tally(tally),
            Err(e) => self.fail(e),
        }
    }

    /// Verify the provider's network, then read the tally.
    async fn refresh_chain_and_tally(&self) -> Result<Tally, ClientError> {
        let gateway = self.gateway.as_ref().ok_or(ClientError::ProviderUnavailable)?;
        gateway.verify_chain().await?;
        Ok(gateway.read_tally().await?)
    }

    /// Check the network and submit the vote; a mismatched chain is caught
    /// before the write leaves the client.
    async fn submit_vote(
        &self,
        candidate: CandidateId,
        account: Account,
    ) -> Result<TxReceipt, ClientError> {
        let gateway = self.gateway.as_ref().ok_or(ClientError::ProviderUnavailable)?;
        gateway.verify_chain().await?;
        Ok(gateway.cast_vote(candidate, account).await?)
    }

    async fn fetch_tally(&self) -> Result<Tally, ClientError> {
        let gateway = self.gateway.as_ref().ok_or(ClientError::ProviderUnavailable)?;
        Ok(gateway.read_tally().await?)
    }

    fn apply_tally(&mut self, tally: Tally) {
        for candidate in &mut self.candidates {
            candidate.vote_count = tally.count(candidate.id);
        }
    }

    fn reset_to_idle(&mut self) {
        self.set_phase(Phase::Idle);
        self.tx_state = TxState::Idle;
        self.last_error = None;
        for candidate in &mut self.candidates {
            candidate.vote_count = U256::ZERO;
        }
    }

    fn fail(&mut self, e: ClientError) {
        tracing::warn!("{e}");
        self.last_error = Some(e);
    }

    fn set_phase(&mut self, next: Phase) {
        if self.phase != next {
            tracing::debug!(from = self.phase.as_str(), to = next.as_str(), "phase transition");
            self.phase = next;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::Address;
    use ballot_nullables::NullProvider;

    fn config() -> ClientConfig {
        ClientConfig {
            contract_address: Address::repeat_byte(0x42),
            chain_id: ChainId::MAINNET,
            ..ClientConfig::default()
        }
    }

    fn connected_vm() -> (Arc<NullProvider>, VotingViewModel) {
        let provider = Arc::new(NullProvider::with_account(Account::new(
            Address::repeat_byte(0x11),
        )));
        let vm = VotingViewModel::new(
            Some(Arc::clone(&provider) as Arc<dyn WalletProvider>),
            &config(),
        );
        (provider, vm)
    }

    #[tokio::test]
    async fn vote_intent_while_voting_is_a_no_op() {
        let (provider, mut vm) = connected_vm();
        vm.on_connect_intent().await;
        assert_eq!(vm.phase(), Phase::Connected);

        // A write is in flight.
        vm.phase = Phase::Voting;
        vm.on_vote_intent(CandidateId::A).await;

        assert_eq!(provider.sent_count(), 0);
        assert_eq!(vm.phase(), Phase::Voting);
    }

    #[tokio::test]
    async fn connect_intent_is_idempotent_while_connecting() {
        let (provider, mut vm) = connected_vm();
        vm.phase = Phase::Connecting;
        vm.on_connect_intent().await;

        // No authorization request was issued by the second intent.
        assert!(provider.recorded().is_empty());
        assert_eq!(vm.phase(), Phase::Connecting);
    }

    #[tokio::test]
    async fn empty_account_notification_forces_idle_even_while_voting() {
        let (_provider, mut vm) = connected_vm();
        vm.on_connect_intent().await;
        vm.phase = Phase::Voting;

        vm.on_accounts_changed(Vec::new()).await;
        assert_eq!(vm.phase(), Phase::Idle);
        assert_eq!(vm.account(), None);
    }
}
