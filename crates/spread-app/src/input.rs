//! Distribution inputs and their validation.

use std::str::FromStr;

use rust_decimal::Decimal;
use spread_alloc::AllocError;
use spread_types::{Amount, ParticipantId};

/// Reasons a distribution is rejected. None of them change any state.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("payer is required")]
    MissingPayer,

    #[error("amount is required")]
    MissingAmount,

    #[error("favored percentage is required")]
    MissingPercentage,

    /// A text field could not be read as a number.
    #[error("{field} is not a number: {value:?}")]
    InvalidNumber {
        /// Which field.
        field: &'static str,
        /// The rejected text.
        value: String,
    },

    #[error("amount must be non-negative, got {0}")]
    NegativeAmount(Amount),

    /// The payer is not in the current roster.
    #[error("unknown payer: {0}")]
    UnknownPayer(String),

    /// Nobody besides the payer is taking part.
    #[error("at least one receiver besides the payer is required")]
    NoReceivers,

    #[error(transparent)]
    Allocation(#[from] AllocError),

    /// The ledger refused the allocation, e.g. a total would overflow.
    #[error("ledger update rejected: {0}")]
    Ledger(String),
}

/// What the caller entered for one distribution. Any field may be unset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DistributionInput {
    pub payer: Option<String>,
    pub amount: Option<Amount>,
    pub favored_pct: Option<Decimal>,
}

impl DistributionInput {
    /// Input with every field set.
    pub fn new(payer: impl Into<String>, amount: Amount, favored_pct: Decimal) -> Self {
        Self {
            payer: Some(payer.into()),
            amount: Some(amount),
            favored_pct: Some(favored_pct),
        }
    }

    /// Read raw text fields. Blank fields become unset.
    ///
    /// # Errors
    ///
    /// - [`ValidationError::InvalidNumber`] if a non-blank numeric field
    ///   does not parse
    pub fn parse(payer: &str, amount: &str, favored_pct: &str) -> Result<Self, ValidationError> {
        let payer = payer.trim();
        Ok(Self {
            payer: (!payer.is_empty()).then(|| payer.to_string()),
            amount: parse_number("amount", amount)?,
            favored_pct: parse_number("favored percentage", favored_pct)?,
        })
    }

    /// The input left behind after a successful distribution: the payer
    /// stays selected, amount and percentage are cleared.
    pub fn cleared(&self) -> Self {
        Self {
            payer: self.payer.clone(),
            amount: None,
            favored_pct: None,
        }
    }
}

/// A fully validated distribution, ready for the allocator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistributionRequest {
    pub payer: ParticipantId,
    pub amount: Amount,
    pub favored_pct: Decimal,
    /// Everyone in the roster except the payer, in roster order.
    pub receivers: Vec<ParticipantId>,
}

fn parse_number(field: &'static str, text: &str) -> Result<Option<Decimal>, ValidationError> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(None);
    }
    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .map(Some)
        .map_err(|_| ValidationError::InvalidNumber {
            field,
            value: text.to_string(),
        })
}
