//! seatledger-core: an append-only seat tally for two-candidate elections
//! decided state by state.
//!
//! - `ElectionLedger`: records each state's result once, keeps the running
//!   seat tally, and freezes on finalization
//! - `SharedLedger`: the same ledger behind a read/write lock
//! - `LedgerObserver`: receives a `LedgerEvent` after every accepted write

mod account;
mod candidate;
mod error;
mod event;
mod ledger;
mod shared;
mod snapshot;
mod state_result;

pub use account::AccountId;
pub use candidate::Candidate;
pub use error::Error;
pub use event::{EventLog, LedgerEvent, LedgerObserver};
pub use ledger::ElectionLedger;
pub use shared::SharedLedger;
pub use snapshot::{Digest, LedgerSnapshot, SeatTally};
pub use state_result::StateResult;
