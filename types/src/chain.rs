//! Chain identifier.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies which network the provider is connected to.
///
/// Contract addresses are network-scoped, so the client compares the
/// provider's chain against the chain its contract address belongs to
/// before issuing writes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChainId(u64);

impl ChainId {
    /// Ethereum mainnet.
    pub const MAINNET: Self = Self(1);
    /// The Sepolia test network.
    pub const SEPOLIA: Self = Self(11_155_111);

    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ChainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for ChainId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}
