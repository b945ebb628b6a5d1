//! User-facing error taxonomy.

use ballot_gateway::GatewayError;
use ballot_session::SessionError;
use ballot_types::ChainId;
use thiserror::Error;

/// Every failure the view can render.
///
/// Session and gateway errors are re-mapped into this taxonomy at the
/// view-model boundary; each variant names the intent the user can retry.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ClientError {
    /// No wallet provider is configured or reachable. Not recoverable
    /// without user action, so the message must be instructive.
    #[error("no wallet provider found — configure an RPC endpoint with a wallet attached")]
    ProviderUnavailable,

    /// The user declined the connection or transaction prompt.
    #[error("request declined: {0}")]
    UserRejected(String),

    /// The tally fetch failed; the next intent retries it.
    #[error("could not fetch vote counts: {0}")]
    ReadFailure(String),

    /// The vote transaction failed or reverted.
    #[error("vote failed: {0}")]
    WriteFailure(String),

    /// The provider is on a different network than the contract.
    #[error("wrong network: provider is on chain {actual}, expected chain {expected}")]
    ChainMismatch { expected: ChainId, actual: ChainId },
}

impl From<SessionError> for ClientError {
    fn from(e: SessionError) -> Self {
        match e {
            SessionError::ProviderUnavailable => Self::ProviderUnavailable,
            SessionError::Rejected(reason) => Self::UserRejected(reason),
            SessionError::Provider(e) => {
                // Connection-time transport failures mean the provider is
                // not usable; keep the detail in the log, not the UI.
                tracing::warn!("provider unusable during connect: {e}");
                Self::ProviderUnavailable
            }
        }
    }
}

impl From<GatewayError> for ClientError {
    fn from(e: GatewayError) -> Self {
        match e {
            GatewayError::Read(reason) => Self::ReadFailure(reason),
            GatewayError::Write(reason) => Self::WriteFailure(reason),
            GatewayError::Rejected(reason) => Self::UserRejected(reason),
            GatewayError::ChainMismatch { expected, actual } => {
                Self::ChainMismatch { expected, actual }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_rejection_maps_to_user_rejected() {
        let err: ClientError = SessionError::Rejected("denied".into()).into();
        assert_eq!(err, ClientError::UserRejected("denied".into()));
    }

    #[test]
    fn gateway_mismatch_keeps_both_chains() {
        let err: ClientError = GatewayError::ChainMismatch {
            expected: ChainId::MAINNET,
            actual: ChainId::SEPOLIA,
        }
        .into();
        assert_eq!(
            err,
            ClientError::ChainMismatch {
                expected: ChainId::MAINNET,
                actual: ChainId::SEPOLIA,
            }
        );
    }
}
