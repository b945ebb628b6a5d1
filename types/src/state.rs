//! Transaction lifecycle state.

use crate::tx::TxReceipt;

/// Lifecycle of the most recent vote transaction.
///
/// Owned by the view model; transitions only in response to gateway call
/// completion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TxState {
    /// No transaction submitted yet.
    Idle,
    /// Submitted and awaiting completion.
    Pending,
    /// Completed; the receipt is retained for display.
    Confirmed(TxReceipt),
    /// Failed or reverted, with the reason surfaced verbatim.
    Failed(String),
}

impl TxState {
    /// Whether a write is currently in flight.
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }
}
