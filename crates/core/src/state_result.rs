//! A single state's final, one-shot report.

use crate::{Candidate, Error};
use serde::{Deserialize, Serialize};

/// One state's reported outcome.
///
/// `name` is case-sensitive: "Ohio" and "ohio" are different states.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateResult {
    /// State identifier.
    pub name: String,

    /// Popular votes for candidate A.
    pub votes_a: u64,

    /// Popular votes for candidate B.
    pub votes_b: u64,

    /// Seats awarded to the state's winner.
    pub seats: u32,
}

impl StateResult {
    pub fn new(name: impl Into<String>, votes_a: u64, votes_b: u64, seats: u32) -> Self {
        Self {
            name: name.into(),
            votes_a,
            votes_b,
            seats,
        }
    }

    /// Check the result on its own, without looking at any ledger.
    ///
    /// Checks run tie, then seats, then name, so the first failure is
    /// reported the same way the ledger reports it.
    pub fn validate(&self) -> Result<(), Error> {
        if self.votes_a == self.votes_b {
            return Err(Error::TiedPopularVote {
                state: self.name.clone(),
                votes: self.votes_a,
            });
        }

        if self.seats < 1 {
            return Err(Error::InvalidSeatCount {
                state: self.name.clone(),
            });
        }

        if self.name.is_empty() {
            return Err(Error::EmptyStateName);
        }

        Ok(())
    }

    /// The popular-vote winner. Only meaningful once [`validate`](Self::validate)
    /// has passed.
    pub fn winner(&self) -> Candidate {
        Candidate::by_votes(self.votes_a, self.votes_b)
    }
}
