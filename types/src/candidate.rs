//! The two fixed ballot candidates.

use alloy_primitives::U256;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies one of the two candidates on the ballot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CandidateId {
    A,
    B,
}

impl CandidateId {
    /// Both candidates, in tally order.
    pub const ALL: [Self; 2] = [Self::A, Self::B];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
        }
    }
}

impl fmt::Display for CandidateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One ballot candidate with its last observed vote count.
///
/// Exactly two instances exist, created when the view model is built and
/// never created or destroyed afterwards. `vote_count` is only ever
/// overwritten with a freshly fetched tally — the client never computes
/// counts locally.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Candidate {
    pub id: CandidateId,
    pub display_name: String,
    pub vote_count: U256,
}

impl Candidate {
    pub fn new(id: CandidateId, display_name: impl Into<String>) -> Self {
        Self {
            id,
            display_name: display_name.into(),
            vote_count: U256::ZERO,
        }
    }
}
