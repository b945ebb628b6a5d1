//! Fundamental types for the ballot client.
//!
//! This crate defines the core types shared across every other crate in the
//! workspace: accounts, chain identifiers, candidates, tallies, and
//! transaction state.

pub mod account;
pub mod candidate;
pub mod chain;
pub mod state;
pub mod tally;
pub mod tx;

pub use account::{Account, InvalidAddress};
pub use candidate::{Candidate, CandidateId};
pub use chain::ChainId;
pub use state::TxState;
pub use tally::Tally;
pub use tx::{InvalidTxHash, TxHash, TxReceipt};
