//! # spread-ledger
//!
//! Cumulative payer → receiver balance sheet.
//!
//! Each allocation is folded additively into the running totals. The
//! whole sheet is written through to durable storage after every change
//! and rehydrated at startup.
//!
//! ## Modules
//!
//! - [`ledger`] — In-memory balance sheet and additive merge
//! - [`codec`] — JSON object-of-objects serialization
//! - [`store`] — Durable storage backends
//! - [`book`] — Write-through ledger bound to a store

pub mod book;
pub mod codec;
pub mod ledger;
pub mod store;

pub use book::{LedgerBook, Persistence};
pub use ledger::Ledger;
pub use store::{LedgerStore, MemoryStore};

/// Storage key under which the serialized ledger lives.
pub const LEDGER_KEY: &str = "splitHistory";

/// Error types for ledger persistence.
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    /// The stored blob is not a valid ledger.
    #[error("malformed ledger data: {0}")]
    Malformed(#[from] serde_json::Error),

    /// The database rejected a read or write.
    #[error("storage error: {0}")]
    Db(#[from] spread_db::DbError),

    /// A non-database backend is unavailable.
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// A cumulative total would exceed the decimal range.
    #[error("ledger total overflowed for {payer} -> {receiver}")]
    Overflow { payer: String, receiver: String },
}

/// Convenience result type for ledger persistence.
pub type Result<T> = std::result::Result<T, LedgerError>;
