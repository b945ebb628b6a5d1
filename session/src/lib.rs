//! Wallet session — connection status and the active account.
//!
//! A session tracks which account, if any, the user has connected, and
//! reacts to the provider's account-list notifications. All state is local:
//! disconnecting clears the session only, since wallet providers expose no
//! revocation API.

pub mod error;
pub mod session;

pub use error::SessionError;
pub use session::WalletSession;
