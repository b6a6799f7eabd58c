//! Write-through ledger.
//!
//! [`LedgerBook`] owns the in-memory [`Ledger`] and the store it is
//! persisted to. Every mutation is followed by a synchronous write of the
//! full ledger. A failed write never rolls back the in-memory change; it is
//! logged and reported through [`Persistence::Failed`].

use spread_types::{Allocation, ParticipantId};

use crate::store::LedgerStore;
use crate::{codec, Ledger, Result};

/// Outcome of the write that follows a ledger mutation.
#[must_use]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Persistence {
    /// The store accepted the new state.
    Saved,
    /// The store rejected the write. In-memory state is still updated.
    Failed,
}

impl Persistence {
    pub fn is_saved(self) -> bool {
        self == Persistence::Saved
    }
}

/// A ledger bound to durable storage.
pub struct LedgerBook<S: LedgerStore> {
    ledger: Ledger,
    store: S,
}

impl<S: LedgerStore> LedgerBook<S> {
    /// Load the ledger from `store`.
    ///
    /// A missing entry gives an empty ledger. So does an unreadable one
    /// (logged at warn). A failing read is logged the same way.
    pub fn open(mut store: S) -> Self {
        let ledger = match store.read() {
            Ok(blob) => codec::load_or_empty(blob.as_deref()),
            Err(e) => {
                tracing::warn!(error = %e, "could not read stored ledger, starting empty");
                Ledger::new()
            }
        };
        tracing::info!(payers = ledger.payer_count(), "ledger loaded");
        Self { ledger, store }
    }

    /// Merge `allocation` into `payer`'s row, then persist.
    ///
    /// # Errors
    ///
    /// - [`LedgerError::Overflow`](crate::LedgerError::Overflow) if a total
    ///   would not fit; nothing is merged or written
    pub fn record(&mut self, payer: &ParticipantId, allocation: &Allocation) -> Result<Persistence> {
        self.ledger.record(payer, allocation)?;
        Ok(self.persist())
    }

    /// Clear every row, then remove the stored entry.
    pub fn reset(&mut self) -> Persistence {
        self.ledger.reset();
        match self.store.clear() {
            Ok(()) => {
                tracing::info!("ledger reset");
                Persistence::Saved
            }
            Err(e) => {
                tracing::warn!(error = %e, "ledger reset not persisted");
                Persistence::Failed
            }
        }
    }

    /// Read-only view of the current totals.
    pub fn snapshot(&self) -> &Ledger {
        &self.ledger
    }

    /// Serialize the current totals in their stored form.
    pub fn save(&self) -> Result<String> {
        codec::save(&self.ledger)
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Split into the ledger and its store.
    pub fn into_parts(self) -> (Ledger, S) {
        (self.ledger, self.store)
    }

    fn persist(&mut self) -> Persistence {
        let written = codec::save(&self.ledger).and_then(|blob| self.store.write(&blob));
        match written {
            Ok(()) => Persistence::Saved,
            Err(e) => {
                tracing::warn!(error = %e, "ledger update kept in memory but not persisted");
                Persistence::Failed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryStore;
    use spread_types::{Amount, Share};

    fn id(name: &str) -> ParticipantId {
        ParticipantId::new(name).expect("id")
    }

    fn split(pairs: &[(&str, i64)]) -> Allocation {
        let shares = pairs
            .iter()
            .map(|(name, amount)| Share {
                receiver: id(name),
                amount: Amount::from(*amount),
            })
            .collect();
        Allocation::new(shares, 0)
    }

    #[test]
    fn test_open_empty_store() {
        let book = LedgerBook::open(MemoryStore::new());
        assert!(book.snapshot().is_empty());
    }

    #[test]
    fn test_open_corrupt_store() {
        let book = LedgerBook::open(MemoryStore::with_blob("{{{"));
        assert!(book.snapshot().is_empty());
        // Corrupt value stays until the next write replaces it.
        assert_eq!(book.store().blob(), Some("{{{"));
    }

    #[test]
    fn test_record_writes_through() {
        let mut book = LedgerBook::open(MemoryStore::new());
        assert!(book
            .record(&id("P"), &split(&[("A", 30), ("B", 70)]))
            .expect("record")
            .is_saved());

        let stored = book.store().blob().expect("blob written");
        let reloaded = codec::load(stored).expect("load");
        assert_eq!(&reloaded, book.snapshot());
    }

    #[test]
    fn test_reopen_sees_previous_session() {
        let mut book = LedgerBook::open(MemoryStore::new());
        let _ = book
            .record(&id("P"), &split(&[("A", 30), ("B", 70)]))
            .expect("record");
        let (_, store) = book.into_parts();

        let mut book = LedgerBook::open(store);
        let _ = book
            .record(&id("P"), &split(&[("A", 30), ("B", 70)]))
            .expect("record");
        assert_eq!(book.snapshot().get(&id("P"), &id("A")), Some(Amount::from(60)));
        assert_eq!(book.snapshot().get(&id("P"), &id("B")), Some(Amount::from(140)));
    }

    #[test]
    fn test_failed_write_keeps_memory_state() {
        let mut store = MemoryStore::new();
        store.set_reject_writes(true);
        let mut book = LedgerBook::open(store);

        let outcome = book.record(&id("P"), &split(&[("A", 5)])).expect("record");
        assert_eq!(outcome, Persistence::Failed);
        assert_eq!(book.snapshot().get(&id("P"), &id("A")), Some(Amount::from(5)));
        assert_eq!(book.store().blob(), None);
    }

    #[test]
    fn test_reset_clears_store() {
        let mut book = LedgerBook::open(MemoryStore::new());
        let _ = book.record(&id("P"), &split(&[("A", 5)])).expect("record");
        assert!(book.reset().is_saved());
        assert!(book.snapshot().is_empty());
        assert_eq!(book.store().blob(), None);
    }

    #[test]
    fn test_sqlite_backed_book() {
        let conn = spread_db::open_memory().expect("open");
        let mut book = LedgerBook::open(conn);
        let _ = book
            .record(&id("P"), &split(&[("A", 30), ("B", 70)]))
            .expect("record");
        let (_, conn) = book.into_parts();

        let book = LedgerBook::open(conn);
        assert_eq!(book.snapshot().total_for_payer(&id("P")), Some(Amount::from(100)));
    }

    #[test]
    fn test_overflowing_record_is_not_written() {
        let huge = "50000000000000000000000000000".parse::<Amount>().expect("amount");
        let big = Allocation::new(
            vec![Share {
                receiver: id("A"),
                amount: huge,
            }],
            0,
        );
        let mut book = LedgerBook::open(MemoryStore::new());
        assert!(book.record(&id("P"), &big).expect("first fits").is_saved());
        let stored = book.store().blob().map(str::to_owned);

        let err = book.record(&id("P"), &big).expect_err("overflow");
        assert!(matches!(err, crate::LedgerError::Overflow { .. }));
        assert_eq!(book.snapshot().get(&id("P"), &id("A")), Some(huge));
        assert_eq!(book.store().blob().map(str::to_owned), stored);
    }
}
