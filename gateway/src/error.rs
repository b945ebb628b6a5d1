//! Gateway error types.

use ballot_types::ChainId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("tally read failed: {0}")]
    Read(String),

    #[error("vote transaction failed: {0}")]
    Write(String),

    #[error("transaction declined: {0}")]
    Rejected(String),

    #[error("provider is on chain {actual}, contract lives on chain {expected}")]
    ChainMismatch { expected: ChainId, actual: ChainId },
}
