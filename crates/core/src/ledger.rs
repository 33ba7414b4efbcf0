//! The election ledger: accepts state results and maintains the seat tally.

use crate::{
    AccountId, Candidate, Digest, Error, LedgerEvent, LedgerObserver, LedgerSnapshot, SeatTally,
    StateResult,
};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info};

/// The authoritative record of one election.
///
/// Every write is checked in full before anything is touched, so a rejected
/// call leaves the ledger exactly as it was.
pub struct ElectionLedger {
    /// The only caller allowed to write. Fixed at creation.
    authority: AccountId,

    /// Tally, recorded results and the finalized flag.
    state: LedgerSnapshot,

    /// Notified after each accepted write, in registration order.
    observers: Vec<Arc<dyn LedgerObserver>>,
}

impl ElectionLedger {
    /// Create an empty, open ledger owned by `authority`.
    pub fn new(authority: impl Into<AccountId>) -> Self {
        Self {
            authority: authority.into(),
            state: LedgerSnapshot::default(),
            observers: Vec::new(),
        }
    }

    /// Register an observer for future events.
    pub fn subscribe(&mut self, observer: impl LedgerObserver + 'static) {
        self.observers.push(Arc::new(observer));
        debug!(observers = self.observers.len(), "registered ledger observer");
    }

    pub fn authority(&self) -> &AccountId {
        &self.authority
    }

    /// Record one state's result.
    ///
    /// Guards run in this order and the first failure wins: caller, finalized,
    /// tie, seats, empty name, duplicate.
    pub fn submit_state_result(
        &mut self,
        caller: &AccountId,
        result: StateResult,
    ) -> Result<(), Error> {
        let event = self.record(caller, result)?;
        dispatch(&self.observers, &event);
        Ok(())
    }

    /// Check and apply a submission. The returned event has not been
    /// delivered yet.
    pub(crate) fn record(
        &mut self,
        caller: &AccountId,
        result: StateResult,
    ) -> Result<LedgerEvent, Error> {
        if let Err(e) = self.check_submission(caller, &result) {
            debug!(%caller, state = %result.name, error = %e, "rejected state result");
            return Err(e);
        }

        let winner = result.winner();
        let seats = result.seats;
        let state = result.name.clone();
        self.state.results.insert(state.clone(), result);
        self.state.tally.award(winner, seats);

        info!(
            state = %state,
            %winner,
            seats,
            leader = %self.current_leader(),
            "recorded state result"
        );
        Ok(LedgerEvent::StateResultRecorded { state, winner })
    }

    fn check_submission(&self, caller: &AccountId, result: &StateResult) -> Result<(), Error> {
        self.check_writable(caller)?;
        result.validate()?;

        if self.state.results.contains_key(&result.name) {
            return Err(Error::DuplicateState {
                state: result.name.clone(),
            });
        }

        Ok(())
    }

    fn check_writable(&self, caller: &AccountId) -> Result<(), Error> {
        if caller != &self.authority {
            return Err(Error::Unauthorized {
                caller: caller.clone(),
            });
        }

        if self.state.finalized {
            return Err(Error::AlreadyFinalized);
        }

        Ok(())
    }

    /// Close the election. Returns the leader at the moment of closing.
    pub fn end_election(&mut self, caller: &AccountId) -> Result<Candidate, Error> {
        let leader = self.finalize(caller)?;
        dispatch(&self.observers, &LedgerEvent::ElectionFinalized { leader });
        Ok(leader)
    }

    /// Check and apply finalization without notifying observers.
    pub(crate) fn finalize(&mut self, caller: &AccountId) -> Result<Candidate, Error> {
        if let Err(e) = self.check_writable(caller) {
            debug!(%caller, error = %e, "rejected end of election");
            return Err(e);
        }

        self.state.finalized = true;
        let leader = self.current_leader();
        info!(
            %leader,
            seats_a = self.state.tally.candidate_a,
            seats_b = self.state.tally.candidate_b,
            states = self.state.results.len(),
            "election finalized"
        );
        Ok(leader)
    }

    /// Handles to the registered observers, for delivery outside a lock.
    pub(crate) fn observers(&self) -> Vec<Arc<dyn LedgerObserver>> {
        self.observers.clone()
    }

    /// Whoever holds strictly more seats, `Candidate::None` on a tie.
    pub fn current_leader(&self) -> Candidate {
        self.state.tally.leader()
    }

    pub fn election_ended(&self) -> bool {
        self.state.finalized
    }

    pub fn seat_tally(&self) -> SeatTally {
        self.state.tally
    }

    pub fn seats_for(&self, candidate: Candidate) -> u64 {
        self.state.tally.seats_for(candidate)
    }

    /// The recorded result for `name`, if any.
    pub fn state_result(&self, name: &str) -> Option<&StateResult> {
        self.state.results.get(name)
    }

    pub fn is_submitted(&self, name: &str) -> bool {
        self.state.results.contains_key(name)
    }

    /// Names of all recorded states, in sorted order.
    pub fn submitted_states(&self) -> impl Iterator<Item = &str> {
        self.state.results.keys().map(String::as_str)
    }

    /// Recorded results, sorted by state name.
    pub fn results(&self) -> impl Iterator<Item = &StateResult> {
        self.state.results.values()
    }

    pub fn len(&self) -> usize {
        self.state.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.results.is_empty()
    }

    pub fn snapshot(&self) -> LedgerSnapshot {
        self.state.clone()
    }

    pub fn digest(&self) -> Digest {
        self.state.digest()
    }
}

/// Deliver `event` to each observer in registration order.
pub(crate) fn dispatch(observers: &[Arc<dyn LedgerObserver>], event: &LedgerEvent) {
    for observer in observers {
        observer.notify(event);
    }
}

impl fmt::Debug for ElectionLedger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ElectionLedger")
            .field("authority", &self.authority)
            .field("state", &self.state)
            .field("observers", &self.observers.len())
            .finish()
    }
}
