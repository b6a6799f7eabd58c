//! Event types pushed to session observers.

use serde::{Deserialize, Serialize};

/// Envelope for all session events.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Event {
    pub event_type: EventType,
    pub timestamp: u64,
    pub payload: serde_json::Value,
}

/// All event types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    // Roster events
    ParticipantAdded,
    ParticipantRemoved,

    // Ledger events
    DistributionRecorded,
    LedgerReset,
    LedgerPersistFailed,

    // System events
    SessionStarted,
}

impl EventType {
    /// Whether the event changed the ledger the display layer renders.
    pub fn touches_ledger(self) -> bool {
        matches!(
            self,
            EventType::DistributionRecorded | EventType::LedgerReset
        )
    }
}
