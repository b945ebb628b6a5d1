//! Nullable infrastructure for deterministic testing.
//!
//! The wallet provider is the only external dependency of this client, so
//! this crate provides a single stand-in: a [`NullProvider`] that records
//! every call, answers from scripted response queues, and emits account or
//! chain change events on demand. Never touches the network.
//!
//! Usage: swap the real provider for the nullable in tests.

pub mod provider;

pub use provider::{NullProvider, RecordedCall};
