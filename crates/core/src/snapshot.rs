//! Point-in-time copies of ledger state.
//!
//! A snapshot holds everything a write can change: the tally, the recorded
//! results, and the finalized flag. Two snapshots that compare equal encode to
//! the same CBOR bytes, so their digests match too.

use crate::{Candidate, StateResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Cumulative seats per candidate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatTally {
    pub candidate_a: u64,
    pub candidate_b: u64,
}

impl SeatTally {
    /// Seats held by `candidate`. `Candidate::None` never holds seats.
    pub fn seats_for(&self, candidate: Candidate) -> u64 {
        match candidate {
            Candidate::CandidateA => self.candidate_a,
            Candidate::CandidateB => self.candidate_b,
            Candidate::None => 0,
        }
    }

    /// Credit `seats` to `winner`.
    pub(crate) fn award(&mut self, winner: Candidate, seats: u32) {
        match winner {
            Candidate::CandidateA => self.candidate_a += u64::from(seats),
            Candidate::CandidateB => self.candidate_b += u64::from(seats),
            Candidate::None => {}
        }
    }

    pub fn leader(&self) -> Candidate {
        Candidate::by_seats(self.candidate_a, self.candidate_b)
    }

    pub fn total(&self) -> u64 {
        self.candidate_a + self.candidate_b
    }
}

/// A full copy of ledger state.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    pub tally: SeatTally,
    pub results: BTreeMap<String, StateResult>,
    pub finalized: bool,
}

impl LedgerSnapshot {
    /// BLAKE3 over the snapshot's CBOR encoding.
    pub fn digest(&self) -> Digest {
        let mut hasher = blake3::Hasher::new();
        ciborium::into_writer(self, &mut hasher)
            .expect("encoding a snapshot into a hasher cannot fail");
        Digest(hasher.finalize())
    }

    pub fn leader(&self) -> Candidate {
        self.tally.leader()
    }
}

/// Fingerprint of a [`LedgerSnapshot`]. Equal snapshots have equal digests.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Digest(blake3::Hash);

impl Digest {
    /// 64 lowercase hex characters.
    pub fn to_hex(&self) -> String {
        self.0.to_hex().to_string()
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        self.0.as_bytes()
    }
}

impl fmt::Debug for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hex = self.0.to_hex();
        write!(f, "Digest({}..)", &hex.as_str()[..12])
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.to_hex().as_str())
    }
}
