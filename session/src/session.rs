//! Connection lifecycle for a single wallet session.

use std::sync::Arc;

use tokio::sync::broadcast;

use ballot_provider::{ProviderEvent, WalletProvider};
use ballot_types::Account;

use crate::error::SessionError;

/// Tracks the connection status and active account for one wallet user.
///
/// The provider is an injected capability; `None` models a browser without
/// a wallet extension, which the UI must render as an instructive condition
/// rather than a crash. The session owns only local state — the provider's
/// own authorization set is never mutated here.
pub struct WalletSession {
    provider: Option<Arc<dyn WalletProvider>>,
    account: Option<Account>,
}

impl WalletSession {
    pub fn new(provider: Option<Arc<dyn WalletProvider>>) -> Self {
        Self {
            provider,
            account: None,
        }
    }

    /// Whether a provider is present at all.
    pub fn has_provider(&self) -> bool {
        self.provider.is_some()
    }

    /// The currently connected account, if any.
    pub fn current_account(&self) -> Option<Account> {
        self.account
    }

    pub fn is_connected(&self) -> bool {
        self.account.is_some()
    }

    /// Request account authorization from the user.
    ///
    /// Fails with [`SessionError::ProviderUnavailable`] when no provider is
    /// present and [`SessionError::Rejected`] when the user declines or the
    /// provider yields no accounts.
    pub async fn connect(&mut self) -> Result<Account, SessionError> {
        let provider = self
            .provider
            .as_ref()
            .ok_or(SessionError::ProviderUnavailable)?;

        let accounts = provider.request_accounts().await?;
        let account = accounts
            .first()
            .copied()
            .ok_or_else(|| SessionError::Rejected("no accounts authorized".into()))?;

        tracing::info!(account = %account.short(), "wallet connected");
        self.account = Some(account);
        Ok(account)
    }

    /// Silently resume a previously authorized session.
    ///
    /// Uses the provider's passive account list, so the user is never
    /// prompted. Returns `None` when nothing is authorized or the provider
    /// cannot be reached; resume failures are not surfaced.
    pub async fn resume(&mut self) -> Option<Account> {
        let provider = self.provider.as_ref()?;
        match provider.accounts().await {
            Ok(accounts) => {
                let account = accounts.first().copied()?;
                tracing::info!(account = %account.short(), "session resumed");
                self.account = Some(account);
                Some(account)
            }
            Err(e) => {
                tracing::debug!("silent resume failed: {e}");
                None
            }
        }
    }

    /// Clear local session state.
    ///
    /// The provider keeps its authorization — wallets expose no revocation
    /// API — so a later `resume` may reconnect without a prompt.
    pub fn disconnect(&mut self) {
        if let Some(account) = self.account.take() {
            tracing::info!(account = %account.short(), "wallet disconnected");
        }
    }

    /// Apply an account-list change notification.
    ///
    /// An empty list disconnects the session; otherwise the first account
    /// is adopted (the most recent notification always wins). Returns the
    /// new active account.
    pub fn apply_account_change(&mut self, accounts: &[Account]) -> Option<Account> {
        match accounts.first().copied() {
            Some(account) => {
                if self.account != Some(account) {
                    tracing::info!(account = %account.short(), "active account changed");
                }
                self.account = Some(account);
                Some(account)
            }
            None => {
                self.disconnect();
                None
            }
        }
    }

    /// Subscribe to the provider's account and chain notifications.
    ///
    /// Each call yields a fresh receiver that supersedes any previously
    /// held one; dropping a receiver detaches its subscription on every
    /// exit path. Holding one receiver per session keeps event delivery
    /// single.
    pub fn events(&self) -> Result<broadcast::Receiver<ProviderEvent>, SessionError> {
        let provider = self
            .provider
            .as_ref()
            .ok_or(SessionError::ProviderUnavailable)?;
        Ok(provider.subscribe())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::Address;
    use ballot_nullables::NullProvider;
    use ballot_provider::ProviderError;

    fn account(byte: u8) -> Account {
        Account::new(Address::repeat_byte(byte))
    }

    fn session_with(provider: Arc<NullProvider>) -> WalletSession {
        WalletSession::new(Some(provider as Arc<dyn WalletProvider>))
    }

    #[tokio::test]
    async fn connect_without_provider_is_unavailable() {
        let mut session = WalletSession::new(None);
        let err = session.connect().await.unwrap_err();
        assert!(matches!(err, SessionError::ProviderUnavailable));
        assert!(!session.is_connected());
    }

    #[tokio::test]
    async fn connect_adopts_first_account() {
        let provider = Arc::new(NullProvider::new());
        provider.set_accounts(vec![account(0x11), account(0x22)]);

        let mut session = session_with(provider);
        let connected = session.connect().await.unwrap();
        assert_eq!(connected, account(0x11));
        assert_eq!(session.current_account(), Some(account(0x11)));
    }

    #[tokio::test]
    async fn rejected_authorization_leaves_session_disconnected() {
        let provider = Arc::new(NullProvider::new());
        provider.push_request_response(Err(ProviderError::Rejected("denied".into())));

        let mut session = session_with(provider);
        let err = session.connect().await.unwrap_err();
        assert!(matches!(err, SessionError::Rejected(_)));
        assert!(!session.is_connected());
    }

    #[tokio::test]
    async fn empty_authorization_counts_as_rejection() {
        let provider = Arc::new(NullProvider::new());

        let mut session = session_with(provider);
        let err = session.connect().await.unwrap_err();
        assert!(matches!(err, SessionError::Rejected(_)));
    }

    #[tokio::test]
    async fn resume_is_silent_and_never_prompts() {
        let provider = Arc::new(NullProvider::with_account(account(0x11)));

        let mut session = session_with(Arc::clone(&provider));
        assert_eq!(session.resume().await, Some(account(0x11)));

        // Passive listing only; no authorization request was issued.
        let recorded = provider.recorded();
        assert!(recorded
            .iter()
            .all(|c| !matches!(c, ballot_nullables::RecordedCall::RequestAccounts)));
    }

    #[tokio::test]
    async fn resume_without_authorization_stays_disconnected() {
        let provider = Arc::new(NullProvider::new());
        let mut session = session_with(provider);
        assert_eq!(session.resume().await, None);
        assert!(!session.is_connected());
    }

    #[tokio::test]
    async fn disconnect_clears_only_local_state() {
        let provider = Arc::new(NullProvider::with_account(account(0x11)));
        let mut session = session_with(Arc::clone(&provider));
        session.connect().await.unwrap();

        session.disconnect();
        assert!(!session.is_connected());

        // Provider authorization survives, so resume reconnects silently.
        assert_eq!(session.resume().await, Some(account(0x11)));
    }

    #[tokio::test]
    async fn account_change_adopts_latest_account() {
        let provider = Arc::new(NullProvider::with_account(account(0x11)));
        let mut session = session_with(provider);
        session.connect().await.unwrap();

        session.apply_account_change(&[account(0x22)]);
        assert_eq!(session.current_account(), Some(account(0x22)));
    }

    #[tokio::test]
    async fn empty_account_change_disconnects() {
        let provider = Arc::new(NullProvider::with_account(account(0x11)));
        let mut session = session_with(provider);
        session.connect().await.unwrap();

        session.apply_account_change(&[]);
        assert!(!session.is_connected());
    }

    #[tokio::test]
    async fn events_are_delivered_to_the_subscriber() {
        let provider = Arc::new(NullProvider::new());
        let session = session_with(Arc::clone(&provider));

        let mut rx = session.events().unwrap();
        provider.emit(ProviderEvent::AccountsChanged(vec![account(0x22)]));
        assert_eq!(
            rx.recv().await.unwrap(),
            ProviderEvent::AccountsChanged(vec![account(0x22)])
        );
    }

    #[test]
    fn events_without_provider_is_unavailable() {
        let session = WalletSession::new(None);
        assert!(matches!(
            session.events(),
            Err(SessionError::ProviderUnavailable)
        ));
    }
}
