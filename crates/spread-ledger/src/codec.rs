//! Ledger serialization.
//!
//! The stored shape is a JSON object of objects with numeric leaves:
//!
//! ```text
//! { "<payer>": { "<receiver>": <number>, ... }, ... }
//! ```

use crate::{Ledger, Result};

/// Serialize `ledger` to its stored JSON form.
pub fn save(ledger: &Ledger) -> Result<String> {
    Ok(serde_json::to_string(ledger)?)
}

/// Parse a stored JSON blob.
///
/// # Errors
///
/// - [`crate::LedgerError::Malformed`] if the blob is not an object of
///   objects of numbers, or a participant key is blank
pub fn load(serialized: &str) -> Result<Ledger> {
    Ok(serde_json::from_str(serialized)?)
}

/// Parse a possibly absent blob, treating absence and corruption as an
/// empty ledger.
pub fn load_or_empty(serialized: Option<&str>) -> Ledger {
    let Some(blob) = serialized else {
        return Ledger::new();
    };
    match load(blob) {
        Ok(ledger) => ledger,
        Err(e) => {
            tracing::warn!(error = %e, "stored ledger is unreadable, starting empty");
            Ledger::new()
        }
    }
}
