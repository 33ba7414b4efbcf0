//! seatledger-cli: a command-line harness around `seatledger-core`.
//!
//! Loads state results from TOML, replays them into a ledger owned by the
//! configured authority, and reports the resulting tally.

pub mod cli;
mod config;
mod results;
mod tally;

pub use config::{ConfigOverrides, LedgerConfig};
pub use results::{Problem, ResultsFile};
pub use tally::{Rejection, TallyOptions, TallyReport, run_tally};
