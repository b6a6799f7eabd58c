//! # spread-app
//!
//! Application layer for the shared-expense spreader. Owns the session
//! state the display layer drives: the participant roster, the
//! write-through ledger, configuration, logging, and change notification.
//!
//! ## Modules
//!
//! - [`config`] — TOML configuration
//! - [`display`] — Formatted ledger views
//! - [`events`] — Observer and broadcast notification
//! - [`input`] — Distribution inputs and validation
//! - [`logging`] — Tracing subscriber setup
//! - [`session`] — The session state object and its actions

pub mod config;
pub mod display;
pub mod events;
pub mod input;
pub mod logging;
pub mod session;

pub use config::SpreadConfig;
pub use input::{DistributionInput, ValidationError};
pub use session::{Distribution, Session};

use rusqlite::Connection;
use tracing::info;

/// Open a session on the configured SQLite database.
///
/// Creates the data directory if needed. With `storage.in_memory` set the
/// ledger lives in an in-memory database and is lost on exit.
pub fn open_session(config: &SpreadConfig) -> anyhow::Result<Session<Connection>> {
    let conn = if config.storage.in_memory {
        info!("Opening in-memory ledger store");
        spread_db::open_memory()?
    } else {
        let data_dir = config.data_dir();
        std::fs::create_dir_all(&data_dir)?;
        let db_path = config.db_path();
        info!("Opening ledger store at {:?}", db_path);
        spread_db::open(&db_path)?
    };
    Ok(Session::open(conn, config.distribution.clone()))
}
