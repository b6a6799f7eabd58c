//! The running session: roster, ledger, and the user-facing actions.
//!
//! All actions run to completion before returning. The session is the only
//! writer of its ledger.

use rust_decimal::Decimal;
use spread_alloc::{allocate, RandomSource, ThreadRandom};
use spread_ledger::{Ledger, LedgerBook, LedgerStore, Persistence};
use spread_types::events::EventType;
use spread_types::{Allocation, Amount, ParticipantId, ParticipantSet};
use tracing::{debug, info};

use crate::config::DistributionConfig;
use crate::display::{self, LedgerView};
use crate::events::EventBus;
use crate::input::{DistributionInput, DistributionRequest, ValidationError};

/// Result of a successful distribution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Distribution {
    pub payer: ParticipantId,
    pub amount: Amount,
    pub favored_pct: Decimal,
    pub allocation: Allocation,
    /// Whether the updated ledger reached durable storage.
    pub persistence: Persistence,
}

/// Explicitly owned application state.
pub struct Session<S: LedgerStore, R: RandomSource = ThreadRandom> {
    participants: ParticipantSet,
    book: LedgerBook<S>,
    rng: R,
    settings: DistributionConfig,
    events: EventBus,
}

impl<S: LedgerStore> Session<S, ThreadRandom> {
    /// Open a session over `store` with the thread RNG.
    pub fn open(store: S, settings: DistributionConfig) -> Self {
        Self::with_random(store, ThreadRandom, settings)
    }
}

impl<S: LedgerStore, R: RandomSource> Session<S, R> {
    /// Open a session over `store` with a caller-supplied random source.
    pub fn with_random(store: S, rng: R, settings: DistributionConfig) -> Self {
        let book = LedgerBook::open(store);
        let events = EventBus::default();
        info!(payers = book.snapshot().payer_count(), "session started");
        events.emit_now(
            EventType::SessionStarted,
            serde_json::json!({ "version": env!("CARGO_PKG_VERSION") }),
        );
        Self {
            participants: ParticipantSet::new(),
            book,
            rng,
            settings,
            events,
        }
    }

    /// Add a participant. Blank or duplicate names are ignored.
    pub fn add_participant(&mut self, name: &str) -> bool {
        let Some(id) = self.participants.add(name) else {
            debug!(name, "participant not added");
            return false;
        };
        self.events.emit_now(
            EventType::ParticipantAdded,
            serde_json::json!({ "name": id.as_str() }),
        );
        true
    }

    /// Remove a participant. Ledger rows that mention them are kept.
    pub fn remove_participant(&mut self, name: &str) -> bool {
        if !self.participants.remove(name) {
            return false;
        }
        self.events.emit_now(
            EventType::ParticipantRemoved,
            serde_json::json!({ "name": name }),
        );
        true
    }

    pub fn participants(&self) -> &ParticipantSet {
        &self.participants
    }

    /// Check `input` against the roster and settings.
    ///
    /// # Errors
    ///
    /// Any [`ValidationError`] except `InvalidNumber` and `Allocation`.
    pub fn validate(&self, input: &DistributionInput) -> Result<DistributionRequest, ValidationError> {
        let payer_name = input.payer.as_deref().ok_or(ValidationError::MissingPayer)?;
        let amount = input.amount.ok_or(ValidationError::MissingAmount)?;
        let favored_pct = match input.favored_pct {
            Some(pct) => pct,
            None if self.settings.require_percentage => {
                return Err(ValidationError::MissingPercentage)
            }
            None => self.settings.default_favored_pct,
        };

        if amount < Decimal::ZERO {
            return Err(ValidationError::NegativeAmount(amount));
        }

        let payer = self
            .participants
            .get(payer_name.trim())
            .cloned()
            .ok_or_else(|| ValidationError::UnknownPayer(payer_name.to_string()))?;

        let receivers = self.participants.receivers_for(&payer);
        if receivers.is_empty() {
            return Err(ValidationError::NoReceivers);
        }

        Ok(DistributionRequest {
            payer,
            amount,
            favored_pct,
            receivers,
        })
    }

    /// Allocate `input.amount` over everyone but the payer and record it.
    ///
    /// On any error nothing is allocated, recorded, or written.
    pub fn distribute(&mut self, input: &DistributionInput) -> Result<Distribution, ValidationError> {
        let request = self.validate(input)?;
        let allocation = allocate(
            request.amount,
            &request.receivers,
            request.favored_pct,
            &mut self.rng,
        )?;

        let persistence = self
            .book
            .record(&request.payer, &allocation)
            .map_err(|e| ValidationError::Ledger(e.to_string()))?;

        let favored = allocation.favored().map(|s| s.receiver.as_str());
        info!(
            payer = %request.payer,
            amount = %request.amount,
            favored = favored.unwrap_or("-"),
            "distribution recorded"
        );
        self.events.emit_now(
            EventType::DistributionRecorded,
            serde_json::json!({
                "payer": request.payer.as_str(),
                "amount": request.amount,
                "favored": favored,
                "shares": allocation.shares(),
            }),
        );
        if persistence == Persistence::Failed {
            self.events.emit_now(
                EventType::LedgerPersistFailed,
                serde_json::json!({ "action": "distribute" }),
            );
        }

        Ok(Distribution {
            payer: request.payer,
            amount: request.amount,
            favored_pct: request.favored_pct,
            allocation,
            persistence,
        })
    }

    /// Clear the whole ledger. Confirmation is the caller's job.
    pub fn reset(&mut self) -> Persistence {
        let persistence = self.book.reset();
        self.events
            .emit_now(EventType::LedgerReset, serde_json::json!({}));
        if persistence == Persistence::Failed {
            self.events.emit_now(
                EventType::LedgerPersistFailed,
                serde_json::json!({ "action": "reset" }),
            );
        }
        persistence
    }

    /// Current totals.
    pub fn snapshot(&self) -> &Ledger {
        self.book.snapshot()
    }

    /// Current totals with amounts formatted for display.
    pub fn view(&self) -> LedgerView {
        display::ledger_view(self.book.snapshot())
    }

    /// Current totals as plain text lines.
    pub fn render_lines(&self) -> Vec<String> {
        display::render_lines(self.book.snapshot())
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    /// Mutable access for registering observers.
    pub fn events_mut(&mut self) -> &mut EventBus {
        &mut self.events
    }

    pub fn book(&self) -> &LedgerBook<S> {
        &self.book
    }

    /// End the session, handing back the ledger book and its store.
    pub fn into_book(self) -> LedgerBook<S> {
        self.book
    }
}
