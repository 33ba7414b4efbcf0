//! The two contenders, plus the "nobody leads" sentinel.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A candidate in a two-way race.
///
/// `None` is only ever produced by a seat tie. It is never the winner of a
/// single state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Candidate {
    /// Nobody leads.
    #[default]
    None = 0,
    CandidateA = 1,
    CandidateB = 2,
}

impl Candidate {
    /// Stable numeric code: 0 for `None`, 1 for A, 2 for B.
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Inverse of [`Candidate::code`].
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Candidate::None),
            1 => Some(Candidate::CandidateA),
            2 => Some(Candidate::CandidateB),
            _ => Option::None,
        }
    }

    /// The popular-vote winner of a state. Callers must rule out ties first;
    /// equal counts fall through to B.
    pub fn by_votes(votes_a: u64, votes_b: u64) -> Self {
        if votes_a > votes_b {
            Candidate::CandidateA
        } else {
            Candidate::CandidateB
        }
    }

    /// Whoever holds strictly more seats, or `None` on a tie.
    pub fn by_seats(seats_a: u64, seats_b: u64) -> Self {
        match seats_a.cmp(&seats_b) {
            std::cmp::Ordering::Greater => Candidate::CandidateA,
            std::cmp::Ordering::Less => Candidate::CandidateB,
            std::cmp::Ordering::Equal => Candidate::None,
        }
    }

    pub fn is_none(self) -> bool {
        self == Candidate::None
    }
}

impl fmt::Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Candidate::None => "none",
            Candidate::CandidateA => "candidate-a",
            Candidate::CandidateB => "candidate-b",
        };
        f.write_str(name)
    }
}
