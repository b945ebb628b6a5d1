//! Session error types.

use ballot_provider::ProviderError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("no wallet provider available")]
    ProviderUnavailable,

    #[error("connection rejected: {0}")]
    Rejected(String),

    #[error("provider error: {0}")]
    Provider(ProviderError),
}

impl From<ProviderError> for SessionError {
    fn from(e: ProviderError) -> Self {
        match e {
            ProviderError::Unavailable => Self::ProviderUnavailable,
            ProviderError::Rejected(reason) => Self::Rejected(reason),
            other => Self::Provider(other),
        }
    }
}
