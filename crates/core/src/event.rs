//! Notifications emitted by the ledger.
//!
//! Observers are told about accepted writes only. Rejected operations never
//! produce an event.

use crate::Candidate;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, PoisonError};

/// Something that happened to the ledger.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum LedgerEvent {
    /// A state result was accepted.
    StateResultRecorded { state: String, winner: Candidate },
    /// The election was finalized with this leader.
    ElectionFinalized { leader: Candidate },
}

/// Trait for receiving ledger notifications.
pub trait LedgerObserver: Send + Sync {
    /// Called once per accepted write, after the ledger has been updated.
    fn notify(&self, event: &LedgerEvent);
}

impl<F> LedgerObserver for F
where
    F: Fn(&LedgerEvent) + Send + Sync,
{
    fn notify(&self, event: &LedgerEvent) {
        self(event)
    }
}

/// An observer that keeps every event it sees, in order.
///
/// Clones share the same log, so a test or harness can hand one clone to the
/// ledger and read from another.
#[derive(Clone, Debug, Default)]
pub struct EventLog {
    events: Arc<Mutex<Vec<LedgerEvent>>>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of all events recorded so far.
    pub fn events(&self) -> Vec<LedgerEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn len(&self) -> usize {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn last(&self) -> Option<LedgerEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
    }
}

impl LedgerObserver for EventLog {
    fn notify(&self, event: &LedgerEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event.clone());
    }
}
