//! In-memory balance sheet.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use spread_types::{Allocation, Amount, ParticipantId};

use crate::{LedgerError, Result};

/// Receiver → cumulative amount, for one payer.
pub type PayerRow = BTreeMap<ParticipantId, Amount>;

/// Cumulative amounts keyed by payer, then receiver.
///
/// Every cell is the sum of all allocation amounts recorded for that
/// `(payer, receiver)` pair since the last reset. Keys are kept sorted so
/// snapshots and serialized output are deterministic.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ledger {
    entries: BTreeMap<ParticipantId, PayerRow>,
}

impl Ledger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold `allocation` into the totals for `payer`.
    ///
    /// Missing cells start at zero. Existing cells are only ever added to.
    /// All new totals are computed before any cell is written, so a
    /// rejected merge leaves the ledger untouched.
    ///
    /// # Errors
    ///
    /// - [`LedgerError::Overflow`] if any total would not fit a decimal
    pub fn record(&mut self, payer: &ParticipantId, allocation: &Allocation) -> Result<()> {
        let row = self.entries.get(payer);
        let mut updated = Vec::with_capacity(allocation.len());
        for (receiver, amount) in allocation.iter() {
            let current = row
                .and_then(|r| r.get(receiver))
                .copied()
                .unwrap_or(Decimal::ZERO);
            let total = current
                .checked_add(amount)
                .ok_or_else(|| LedgerError::Overflow {
                    payer: payer.to_string(),
                    receiver: receiver.to_string(),
                })?;
            updated.push((receiver.clone(), total));
        }

        self.entries
            .entry(payer.clone())
            .or_default()
            .extend(updated);
        tracing::trace!(
            payer = %payer,
            receivers = allocation.len(),
            "ledger: merged allocation"
        );
        Ok(())
    }

    /// Drop every payer and receiver.
    pub fn reset(&mut self) {
        self.entries.clear();
    }

    /// Cumulative amount `payer` has spread to `receiver`.
    pub fn get(&self, payer: &ParticipantId, receiver: &ParticipantId) -> Option<Amount> {
        self.entries.get(payer)?.get(receiver).copied()
    }

    /// The receiver row for `payer`.
    pub fn row(&self, payer: &ParticipantId) -> Option<&PayerRow> {
        self.entries.get(payer)
    }

    /// Iterate payers and their receiver rows.
    pub fn iter(&self) -> impl Iterator<Item = (&ParticipantId, &PayerRow)> {
        self.entries.iter()
    }

    /// Sum of everything `payer` has spread, or `None` if it does not fit
    /// a decimal. A payer with no row totals zero.
    pub fn total_for_payer(&self, payer: &ParticipantId) -> Option<Amount> {
        let Some(row) = self.entries.get(payer) else {
            return Some(Decimal::ZERO);
        };
        row.values()
            .try_fold(Decimal::ZERO, |acc, amount| acc.checked_add(*amount))
    }

    /// Number of payers with at least one row.
    pub fn payer_count(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
