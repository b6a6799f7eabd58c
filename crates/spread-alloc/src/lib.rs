//! # spread-alloc
//!
//! Favored-share allocation.
//!
//! A paid amount is spread over a pool of receivers: one receiver, picked
//! uniformly at random, gets a percentage of the amount and everyone else
//! gets an equal whole-unit share of what is left. Rounding residue goes
//! to the favored receiver so the allocation always sums to the input.
//!
//! ## Modules
//!
//! - [`allocator`] — The allocation algorithm
//! - [`random`] — Injectable random source for favored-receiver selection

pub mod allocator;
pub mod random;

pub use allocator::{allocate, favored_share};
pub use random::{FixedRandom, RandomSource, ThreadRandom};

/// Error types for allocation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AllocError {
    /// The amount to spread is below zero.
    #[error("amount must be non-negative, got {0}")]
    NegativeAmount(spread_types::Amount),

    /// There is nobody to spread the amount over.
    #[error("receiver pool is empty")]
    NoReceivers,

    /// The same receiver appears more than once.
    #[error("duplicate receiver: {0}")]
    DuplicateReceiver(String),

    /// The random source picked an index outside the receiver pool.
    #[error("favored index {index} out of range for {len} receivers")]
    IndexOutOfRange {
        /// The index returned by the random source.
        index: usize,
        /// Number of receivers.
        len: usize,
    },

    /// Decimal arithmetic overflowed.
    #[error("arithmetic overflow in allocation")]
    Overflow,
}

/// Convenience result type for allocation.
pub type Result<T> = std::result::Result<T, AllocError>;
