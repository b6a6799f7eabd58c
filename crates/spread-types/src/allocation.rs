//! Per-distribution allocation.

use serde::{Deserialize, Serialize};

use crate::{Amount, ParticipantId};

/// One receiver's part of an allocation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Share {
    pub receiver: ParticipantId,
    pub amount: Amount,
}

/// The amounts computed for a single distribution.
///
/// Shares are kept in receiver order and sum exactly to the distributed
/// amount. Consumed by the ledger right after it is produced.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Allocation {
    shares: Vec<Share>,
    favored_index: usize,
}

impl Allocation {
    /// Assemble an allocation from ordered shares.
    ///
    /// `favored_index` should point into `shares`. An index that does not
    /// makes [`Allocation::favored`] return `None`.
    pub fn new(shares: Vec<Share>, favored_index: usize) -> Self {
        Self {
            shares,
            favored_index,
        }
    }

    /// Shares in receiver order.
    pub fn shares(&self) -> &[Share] {
        &self.shares
    }

    /// Iterate `(receiver, amount)` pairs in receiver order.
    pub fn iter(&self) -> impl Iterator<Item = (&ParticipantId, Amount)> {
        self.shares.iter().map(|s| (&s.receiver, s.amount))
    }

    /// The randomly selected receiver of the percentage share.
    pub fn favored(&self) -> Option<&Share> {
        self.shares.get(self.favored_index)
    }

    pub fn favored_index(&self) -> usize {
        self.favored_index
    }

    /// Amount assigned to `receiver`, if it is part of this allocation.
    pub fn amount_for(&self, receiver: &ParticipantId) -> Option<Amount> {
        self.shares
            .iter()
            .find(|s| &s.receiver == receiver)
            .map(|s| s.amount)
    }

    /// Sum of all shares, or `None` if it does not fit a decimal.
    pub fn total(&self) -> Option<Amount> {
        self.shares
            .iter()
            .try_fold(Amount::ZERO, |acc, s| acc.checked_add(s.amount))
    }

    pub fn len(&self) -> usize {
        self.shares.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shares.is_empty()
    }
}
