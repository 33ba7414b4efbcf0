//! Replays a results file into a fresh ledger.

use anyhow::{Context, Result, bail};
use seatledger_core::{
    AccountId, Candidate, ElectionLedger, EventLog, LedgerEvent, StateResult,
};
use serde::Serialize;
use std::fmt;
use tracing::{debug, warn};

use crate::LedgerConfig;

/// How a replay should behave.
#[derive(Clone, Debug, Default)]
pub struct TallyOptions {
    /// Submit as this caller instead of the authority.
    pub caller: Option<String>,
    /// Finalize after the last result.
    pub finalize: bool,
    /// Stop at the first rejection instead of skipping it.
    pub strict: bool,
}

/// A write the ledger refused.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Rejection {
    /// State name, or `None` for a refused finalization.
    pub state: Option<String>,
    pub reason: String,
}

/// Outcome of a replay.
#[derive(Clone, Debug, Serialize)]
pub struct TallyReport {
    pub authority: AccountId,
    pub caller: AccountId,
    pub seats_a: u64,
    pub seats_b: u64,
    pub leader: Candidate,
    pub ended: bool,
    pub recorded: Vec<String>,
    pub rejected: Vec<Rejection>,
    pub events: Vec<LedgerEvent>,
    pub digest: String,
}

/// Submit `results` in order to a ledger owned by `config.authority`.
pub fn run_tally(
    config: &LedgerConfig,
    results: Vec<StateResult>,
    options: &TallyOptions,
) -> Result<TallyReport> {
    let authority = AccountId::new(config.authority.as_str());
    let caller = options
        .caller
        .as_deref()
        .map(AccountId::new)
        .unwrap_or_else(|| authority.clone());

    let mut ledger = ElectionLedger::new(authority.clone());
    let log = EventLog::new();
    ledger.subscribe(log.clone());
    ledger.subscribe(|event: &LedgerEvent| debug!(?event, "ledger notification"));

    let mut recorded = Vec::new();
    let mut rejected = Vec::new();

    for result in results {
        let state = result.name.clone();
        match ledger.submit_state_result(&caller, result) {
            Ok(()) => recorded.push(state),
            Err(e) if options.strict => {
                return Err(e).with_context(|| format!("state {state:?} was rejected"));
            }
            Err(e) => {
                warn!(state = %state, error = %e, "skipping rejected state result");
                rejected.push(Rejection {
                    state: Some(state),
                    reason: e.to_string(),
                });
            }
        }
    }

    if options.finalize || config.finalize {
        if let Err(e) = ledger.end_election(&caller) {
            if options.strict {
                bail!("could not finalize the election: {e}");
            }
            warn!(error = %e, "could not finalize the election");
            rejected.push(Rejection {
                state: None,
                reason: e.to_string(),
            });
        }
    }

    let tally = ledger.seat_tally();
    Ok(TallyReport {
        authority,
        caller,
        seats_a: tally.candidate_a,
        seats_b: tally.candidate_b,
        leader: ledger.current_leader(),
        ended: ledger.election_ended(),
        recorded,
        rejected,
        events: log.events(),
        digest: ledger.digest().to_hex(),
    })
}

impl fmt::Display for TallyReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "authority:   {}", self.authority)?;
        writeln!(f, "candidate-a: {} seats", self.seats_a)?;
        writeln!(f, "candidate-b: {} seats", self.seats_b)?;
        writeln!(f, "leader:      {}", self.leader)?;
        writeln!(f, "ended:       {}", self.ended)?;
        writeln!(f, "recorded:    {} state(s)", self.recorded.len())?;
        for rejection in &self.rejected {
            match &rejection.state {
                Some(state) => writeln!(f, "rejected:    {state}: {}", rejection.reason)?,
                None => writeln!(f, "rejected:    finalization: {}", rejection.reason)?,
            }
        }
        write!(f, "digest:      {}", self.digest)
    }
}
