//! Vote tally as read from the contract.

use alloy_primitives::U256;
use serde::{Deserialize, Serialize};

use crate::candidate::CandidateId;

/// The pair of vote counts for the two fixed candidates, in (A, B) order.
///
/// Always sourced live from the contract's read call. Counters stay as
/// 256-bit integers end to end; they are never narrowed to a platform
/// integer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tally {
    pub candidate_a: U256,
    pub candidate_b: U256,
}

impl Tally {
    pub fn new(candidate_a: U256, candidate_b: U256) -> Self {
        Self {
            candidate_a,
            candidate_b,
        }
    }

    /// Count for a single candidate.
    pub fn count(&self, id: CandidateId) -> U256 {
        match id {
            CandidateId::A => self.candidate_a,
            CandidateId::B => self.candidate_b,
        }
    }
}
