//! Provider error types.

use thiserror::Error;

/// JSON-RPC error code a wallet returns when the user rejects a request
/// (EIP-1193).
pub const USER_REJECTED_CODE: i64 = 4001;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("no wallet provider available")]
    Unavailable,

    #[error("request rejected by user: {0}")]
    Rejected(String),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("provider RPC error {code}: {message}")]
    Rpc { code: i64, message: String },

    #[error("invalid provider response: {0}")]
    InvalidResponse(String),
}

impl ProviderError {
    /// Classify a JSON-RPC error object, separating user rejection from
    /// other provider failures.
    pub fn from_rpc(code: i64, message: String) -> Self {
        if code == USER_REJECTED_CODE {
            Self::Rejected(message)
        } else {
            Self::Rpc { code, message }
        }
    }
}
