//! A thread-safe handle around one ledger.

use crate::ledger::dispatch;
use crate::{
    AccountId, Candidate, Digest, ElectionLedger, Error, LedgerEvent, LedgerObserver,
    LedgerSnapshot, SeatTally, StateResult,
};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Cloneable handle for hosts that call the ledger from several threads.
///
/// Writes hold the write lock while the ledger is checked and updated. Reads
/// share the read lock. Observers run after the write lock is released, so an
/// observer may read the ledger back through any clone of the handle. Events
/// from writers on different threads may reach observers in either order.
///
/// A poisoned lock is recovered. The ledger only mutates after every guard
/// has passed, and no observer runs under the lock.
#[derive(Clone, Debug)]
pub struct SharedLedger {
    inner: Arc<RwLock<ElectionLedger>>,
}

impl SharedLedger {
    pub fn new(authority: impl Into<AccountId>) -> Self {
        Self::from(ElectionLedger::new(authority))
    }

    fn read(&self) -> RwLockReadGuard<'_, ElectionLedger> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, ElectionLedger> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn subscribe(&self, observer: impl LedgerObserver + 'static) {
        self.write().subscribe(observer);
    }

    pub fn submit_state_result(&self, caller: &AccountId, result: StateResult) -> Result<(), Error> {
        let (event, observers) = {
            let mut ledger = self.write();
            let event = ledger.record(caller, result)?;
            (event, ledger.observers())
        };
        dispatch(&observers, &event);
        Ok(())
    }

    pub fn end_election(&self, caller: &AccountId) -> Result<Candidate, Error> {
        let (leader, observers) = {
            let mut ledger = self.write();
            let leader = ledger.finalize(caller)?;
            (leader, ledger.observers())
        };
        dispatch(&observers, &LedgerEvent::ElectionFinalized { leader });
        Ok(leader)
    }

    pub fn current_leader(&self) -> Candidate {
        self.read().current_leader()
    }

    pub fn election_ended(&self) -> bool {
        self.read().election_ended()
    }

    pub fn seat_tally(&self) -> SeatTally {
        self.read().seat_tally()
    }

    pub fn is_submitted(&self, name: &str) -> bool {
        self.read().is_submitted(name)
    }

    pub fn snapshot(&self) -> LedgerSnapshot {
        self.read().snapshot()
    }

    pub fn digest(&self) -> Digest {
        self.read().digest()
    }

    /// Run `f` against the ledger under the read lock.
    pub fn with<R>(&self, f: impl FnOnce(&ElectionLedger) -> R) -> R {
        f(&*self.read())
    }
}

impl From<ElectionLedger> for SharedLedger {
    fn from(ledger: ElectionLedger) -> Self {
        Self {
            inner: Arc::new(RwLock::new(ledger)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EventLog;
    use std::sync::{Mutex, mpsc};
    use std::thread;
    use std::time::Duration;

    #[test]
    fn concurrent_submissions_of_one_state_accept_exactly_once() {
        let ledger = SharedLedger::new("owner");
        let owner = AccountId::new("owner");

        let handles: Vec<_> = (0..8u64)
            .map(|i| {
                let ledger = ledger.clone();
                let owner = owner.clone();
                thread::spawn(move || {
                    ledger.submit_state_result(&owner, StateResult::new("Ohio", 100 + i, 50, 18))
                })
            })
            .collect();

        let outcomes: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        let accepted = outcomes.iter().filter(|r| r.is_ok()).count();
        let duplicates = outcomes
            .iter()
            .filter(|r| matches!(r, Err(Error::DuplicateState { .. })))
            .count();

        assert_eq!(accepted, 1);
        assert_eq!(duplicates, 7);
        assert_eq!(ledger.seat_tally().candidate_a, 18);
    }

    #[test]
    fn concurrent_distinct_states_all_counted() {
        let ledger = SharedLedger::new("owner");
        let log = EventLog::new();
        ledger.subscribe(log.clone());
        let owner = AccountId::new("owner");

        let handles: Vec<_> = (0..10u32)
            .map(|i| {
                let ledger = ledger.clone();
                let owner = owner.clone();
                thread::spawn(move || {
                    let result = if i % 2 == 0 {
                        StateResult::new(format!("state-{i}"), 10, 5, i + 1)
                    } else {
                        StateResult::new(format!("state-{i}"), 5, 10, i + 1)
                    };
                    ledger.submit_state_result(&owner, result)
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap().unwrap();
        }

        // Even states: 1 + 3 + 5 + 7 + 9 seats; odd states: 2 + 4 + 6 + 8 + 10.
        assert_eq!(
            ledger.seat_tally(),
            SeatTally {
                candidate_a: 25,
                candidate_b: 30
            }
        );
        assert_eq!(ledger.current_leader(), Candidate::CandidateB);
        assert_eq!(log.len(), 10);
        assert_eq!(ledger.with(|l| l.len()), 10);
    }

    #[test]
    fn finalize_through_handle() {
        let ledger = SharedLedger::new("owner");
        let owner = AccountId::new("owner");
        ledger
            .submit_state_result(&owner, StateResult::new("Texas", 1000, 900, 38))
            .unwrap();

        assert_eq!(ledger.end_election(&owner), Ok(Candidate::CandidateA));
        assert!(ledger.election_ended());
        assert_eq!(
            ledger.submit_state_result(&owner, StateResult::new("Utah", 1, 2, 6)),
            Err(Error::AlreadyFinalized)
        );
        assert!(!ledger.is_submitted("Utah"));
    }

    #[test]
    fn panicking_observer_does_not_wedge_the_lock() {
        let ledger = SharedLedger::new("owner");
        let owner = AccountId::new("owner");
        ledger.subscribe(|event: &LedgerEvent| {
            if matches!(event, LedgerEvent::StateResultRecorded { state, .. } if state == "Boom") {
                panic!("observer failure");
            }
        });

        let worker = ledger.clone();
        let worker_owner = owner.clone();
        let joined = thread::spawn(move || {
            worker.submit_state_result(&worker_owner, StateResult::new("Boom", 2, 1, 3))
        })
        .join();
        assert!(joined.is_err());

        // The write landed and the lock was released before the observer ran.
        assert!(ledger.is_submitted("Boom"));
        ledger
            .submit_state_result(&owner, StateResult::new("Calm", 1, 2, 3))
            .unwrap();
        assert_eq!(ledger.current_leader(), Candidate::None);
    }

    #[test]
    fn observers_can_read_back_through_the_handle() {
        let ledger = SharedLedger::new("owner");
        let seen = Arc::new(Mutex::new(Vec::new()));

        let handle = ledger.clone();
        let sink = Arc::clone(&seen);
        ledger.subscribe(move |_: &LedgerEvent| {
            let view = (handle.current_leader(), handle.election_ended());
            sink.lock().unwrap().push(view);
        });

        let (tx, rx) = mpsc::channel();
        let worker = ledger.clone();
        thread::spawn(move || {
            let owner = AccountId::new("owner");
            let submitted =
                worker.submit_state_result(&owner, StateResult::new("California", 1000, 900, 32));
            let ended = worker.end_election(&owner);
            let _ = tx.send((submitted, ended));
        });

        let (submitted, ended) = rx
            .recv_timeout(Duration::from_secs(5))
            .expect("writes through the handle did not complete");
        assert_eq!(submitted, Ok(()));
        assert_eq!(ended, Ok(Candidate::CandidateA));
        assert_eq!(
            *seen.lock().unwrap(),
            vec![
                (Candidate::CandidateA, false),
                (Candidate::CandidateA, true)
            ]
        );
    }

    #[test]
    fn observers_can_write_through_the_handle() {
        let ledger = SharedLedger::new("owner");
        let handle = ledger.clone();
        ledger.subscribe(move |event: &LedgerEvent| {
            if matches!(event, LedgerEvent::StateResultRecorded { .. }) {
                let _ = handle.end_election(&AccountId::new("owner"));
            }
        });

        ledger
            .submit_state_result(&AccountId::new("owner"), StateResult::new("Ohio", 800, 1200, 33))
            .unwrap();

        assert!(ledger.election_ended());
        assert_eq!(ledger.current_leader(), Candidate::CandidateB);
    }
}
