//! Wallet account identifier.

use alloy_primitives::Address;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A wallet account address (20 bytes, rendered as 0x-prefixed hex).
///
/// Owned by the wallet session: set on connect, cleared on disconnect or
/// when the provider reports an empty account list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Account(Address);

/// The string could not be parsed as a 20-byte hex address.
#[derive(Debug, Error)]
#[error("invalid account address: {0}")]
pub struct InvalidAddress(String);

impl Account {
    pub fn new(address: Address) -> Self {
        Self(address)
    }

    /// The underlying 20-byte address.
    pub fn address(&self) -> Address {
        self.0
    }

    /// Truncated display form: first 6 + last 4 characters of the full
    /// checksummed string.
    pub fn short(&self) -> String {
        let full = self.to_string();
        format!("{}...{}", &full[..6], &full[full.len() - 4..])
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.to_checksum(None))
    }
}

impl FromStr for Account {
    type Err = InvalidAddress;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Address::from_str(s)
            .map(Self)
            .map_err(|_| InvalidAddress(s.to_string()))
    }
}

impl From<Address> for Account {
    fn from(address: Address) -> Self {
        Self(address)
    }
}
