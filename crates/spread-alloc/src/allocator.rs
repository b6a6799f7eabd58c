//! The favored-share allocation algorithm.
//!
//! ## Steps
//!
//! ```text
//! favored      = round_half_away_from_zero(amount * pct / 100)
//! equal_share  = floor((amount - favored) / (n - 1))      (n > 1)
//! favored     += amount - (favored + equal_share * (n - 1))
//! ```
//!
//! The last step folds every rounding residue into the favored receiver,
//! so the shares always add up to `amount` exactly.

use std::collections::HashSet;

use rust_decimal::{Decimal, RoundingStrategy};
use spread_types::{Allocation, Amount, ParticipantId, Share, PERCENT_SCALE};

use crate::random::RandomSource;
use crate::{AllocError, Result};

/// Compute the favored receiver's pre-reconciliation share.
///
/// `amount * pct / 100`, rounded to a whole unit with midpoints rounded
/// away from zero (2.5 becomes 3, -2.5 becomes -3).
///
/// # Errors
///
/// - [`AllocError::Overflow`] if the product does not fit a decimal
pub fn favored_share(amount: Amount, favored_pct: Decimal) -> Result<Amount> {
    let scaled = amount
        .checked_mul(favored_pct)
        .ok_or(AllocError::Overflow)?
        .checked_div(Decimal::from(PERCENT_SCALE))
        .ok_or(AllocError::Overflow)?;
    Ok(scaled.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
}

/// Spread `amount` over `receivers`, favoring one picked by `rng`.
///
/// The returned allocation lists every receiver once, in input order, and
/// its shares sum exactly to `amount`. `favored_pct` is not range-checked:
/// values below 0 or above 100 are allowed and reconciliation still keeps
/// the total exact.
///
/// # Errors
///
/// - [`AllocError::NegativeAmount`] if `amount` is below zero
/// - [`AllocError::NoReceivers`] if `receivers` is empty
/// - [`AllocError::DuplicateReceiver`] if a receiver is listed twice
/// - [`AllocError::IndexOutOfRange`] if `rng` returns a bad index
/// - [`AllocError::Overflow`] on decimal overflow
pub fn allocate<R: RandomSource + ?Sized>(
    amount: Amount,
    receivers: &[ParticipantId],
    favored_pct: Decimal,
    rng: &mut R,
) -> Result<Allocation> {
    if amount < Decimal::ZERO {
        return Err(AllocError::NegativeAmount(amount));
    }
    if receivers.is_empty() {
        return Err(AllocError::NoReceivers);
    }
    let mut seen = HashSet::with_capacity(receivers.len());
    for receiver in receivers {
        if !seen.insert(receiver) {
            return Err(AllocError::DuplicateReceiver(receiver.to_string()));
        }
    }

    let len = receivers.len();
    let favored_index = rng.pick_index(len);
    if favored_index >= len {
        return Err(AllocError::IndexOutOfRange {
            index: favored_index,
            len,
        });
    }

    let favored_amount = favored_share(amount, favored_pct)?;
    let mut amounts = vec![Decimal::ZERO; len];
    amounts[favored_index] = favored_amount;

    if len > 1 {
        let remainder = amount
            .checked_sub(favored_amount)
            .ok_or(AllocError::Overflow)?;
        let equal_share = remainder
            .checked_div(Decimal::from(len - 1))
            .ok_or(AllocError::Overflow)?
            .floor();
        for (i, slot) in amounts.iter_mut().enumerate() {
            if i != favored_index {
                *slot = equal_share;
            }
        }
    }

    let assigned = amounts
        .iter()
        .try_fold(Decimal::ZERO, |acc, a| acc.checked_add(*a))
        .ok_or(AllocError::Overflow)?;
    let residual = amount.checked_sub(assigned).ok_or(AllocError::Overflow)?;
    amounts[favored_index] = amounts[favored_index]
        .checked_add(residual)
        .ok_or(AllocError::Overflow)?;

    tracing::debug!(
        receivers = len,
        favored = %receivers[favored_index],
        %favored_amount,
        %residual,
        "allocation computed"
    );

    let shares = receivers
        .iter()
        .zip(amounts)
        .map(|(receiver, amount)| Share {
            receiver: receiver.clone(),
            amount,
        })
        .collect();

    Ok(Allocation::new(shares, favored_index))
}
