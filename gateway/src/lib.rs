//! Typed gateway to the deployed voting contract.
//!
//! Wraps the two read/write surfaces of the fixed ballot contract behind
//! typed operations: one idempotent tally read and one vote write per
//! candidate. All ABI handling lives here; callers see domain types only.

pub mod abi;
pub mod error;
pub mod gateway;

pub use error::GatewayError;
pub use gateway::ContractGateway;
