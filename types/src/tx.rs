//! Transaction hash and receipt types.

use alloy_primitives::B256;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The string could not be parsed as a 32-byte hex hash.
#[derive(Debug, Error)]
#[error("invalid transaction hash: {0}")]
pub struct InvalidTxHash(String);

/// Hash of a submitted transaction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TxHash(B256);

impl TxHash {
    pub const ZERO: Self = Self(B256::ZERO);

    pub fn new(hash: B256) -> Self {
        Self(hash)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0 .0
    }
}

impl fmt::Display for TxHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TxHash {
    type Err = InvalidTxHash;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        B256::from_str(s)
            .map(Self)
            .map_err(|_| InvalidTxHash(s.to_string()))
    }
}

/// Receipt for a state-changing contract call, as reported by the
/// provider at submission time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxReceipt {
    pub transaction_hash: TxHash,
}
