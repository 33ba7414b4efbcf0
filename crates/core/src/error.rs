//! Error types for seatledger-core.

use thiserror::Error;

use crate::AccountId;

/// Reasons the ledger rejects a write.
///
/// A rejected operation never mutates the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The caller is not the ledger authority.
    #[error("caller {caller} is not the election authority")]
    Unauthorized { caller: AccountId },

    /// The election has already been finalized.
    #[error("the election has already been finalized")]
    AlreadyFinalized,

    /// Both candidates received the same number of votes in a state.
    #[error("state {state} reported a tied popular vote ({votes} each)")]
    TiedPopularVote { state: String, votes: u64 },

    /// A state must be worth at least one seat.
    #[error("state {state} must carry at least 1 seat")]
    InvalidSeatCount { state: String },

    /// A state result was submitted without a name.
    #[error("state name must not be empty")]
    EmptyStateName,

    /// A result for this state has already been recorded.
    #[error("a result for state {state} was already submitted")]
    DuplicateState { state: String },
}
