//! # spread-types
//!
//! Shared domain types used across the spread workspace: participant
//! identities, the ordered participant roster, per-distribution
//! allocations, and the event envelope pushed to observers.

use std::time::{SystemTime, UNIX_EPOCH};

pub mod allocation;
pub mod events;
pub mod participant;

pub use allocation::{Allocation, Share};
pub use participant::{ParticipantId, ParticipantSet};

/// Monetary amount. Exact decimal so allocations reconcile to the cent.
pub type Amount = rust_decimal::Decimal;

/// Percentage scale used by the favored share (`pct / PERCENT_SCALE`).
pub const PERCENT_SCALE: u32 = 100;

/// Number of decimal places used when amounts are displayed.
pub const DISPLAY_DECIMALS: u32 = 2;

/// Seconds since the Unix epoch, or 0 if the clock is before it.
pub fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

/// Error types for domain value construction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TypesError {
    /// A participant name was empty after trimming.
    #[error("participant name is empty")]
    EmptyParticipant,
}

/// Convenience result type for domain value construction.
pub type Result<T> = std::result::Result<T, TypesError>;
