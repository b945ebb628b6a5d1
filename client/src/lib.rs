//! UI-facing voting client.
//!
//! Composes the wallet session and contract gateway into a deterministic
//! state machine the view renders directly: a connection phase, two fixed
//! candidates with their last observed counts, the lifecycle of the most
//! recent vote transaction, and a mapped error taxonomy. No raw provider
//! or transport error crosses this boundary.

pub mod config;
pub mod error;
pub mod view_model;

pub use config::{ClientConfig, ConfigError};
pub use error::ClientError;
pub use view_model::{Phase, VotingViewModel};
