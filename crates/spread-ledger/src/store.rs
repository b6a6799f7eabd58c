//! Durable storage backends for the serialized ledger.
//!
//! A store holds a single entry under [`LEDGER_KEY`]. Absence of the entry
//! is a valid state and means "empty ledger".

use rusqlite::Connection;
use spread_db::queries::kv;
use spread_types::unix_now;

use crate::{LedgerError, Result, LEDGER_KEY};

/// Somewhere the serialized ledger can be kept between sessions.
pub trait LedgerStore {
    /// Read the stored blob, or `None` if nothing has been saved.
    fn read(&mut self) -> Result<Option<String>>;

    /// Replace the stored blob.
    fn write(&mut self, blob: &str) -> Result<()>;

    /// Remove the stored blob.
    fn clear(&mut self) -> Result<()>;
}

impl LedgerStore for Connection {
    fn read(&mut self) -> Result<Option<String>> {
        Ok(kv::get(self, LEDGER_KEY)?)
    }

    fn write(&mut self, blob: &str) -> Result<()> {
        kv::set(self, LEDGER_KEY, blob, unix_now())?;
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        kv::remove(self, LEDGER_KEY)?;
        Ok(())
    }
}

/// Process-local store. Contents are lost when it is dropped.
///
/// Writes can be switched off to simulate an unavailable backend.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    blob: Option<String>,
    reject_writes: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with `blob` already stored.
    pub fn with_blob(blob: impl Into<String>) -> Self {
        Self {
            blob: Some(blob.into()),
            reject_writes: false,
        }
    }

    /// Make subsequent writes and clears fail (or succeed again).
    pub fn set_reject_writes(&mut self, reject: bool) {
        self.reject_writes = reject;
    }

    /// Currently stored blob.
    pub fn blob(&self) -> Option<&str> {
        self.blob.as_deref()
    }

    fn check_writable(&self) -> Result<()> {
        if self.reject_writes {
            return Err(LedgerError::Unavailable("memory store is read-only".into()));
        }
        Ok(())
    }
}

impl LedgerStore for MemoryStore {
    fn read(&mut self) -> Result<Option<String>> {
        Ok(self.blob.clone())
    }

    fn write(&mut self, blob: &str) -> Result<()> {
        self.check_writable()?;
        self.blob = Some(blob.to_string());
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        self.check_writable()?;
        self.blob = None;
        Ok(())
    }
}

impl<S: LedgerStore + ?Sized> LedgerStore for &mut S {
    fn read(&mut self) -> Result<Option<String>> {
        (**self).read()
    }

    fn write(&mut self, blob: &str) -> Result<()> {
        (**self).write(blob)
    }

    fn clear(&mut self) -> Result<()> {
        (**self).clear()
    }
}
