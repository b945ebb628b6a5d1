//! Provider notifications delivered to subscribers.

use ballot_types::{Account, ChainId};

/// External notifications a provider pushes to the client.
///
/// Notifications may arrive at any suspension point; receivers resolve
/// races by trusting the most recently delivered event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ProviderEvent {
    /// The authorized account list changed (possibly to empty).
    AccountsChanged(Vec<Account>),
    /// The provider switched networks.
    ChainChanged(ChainId),
}
