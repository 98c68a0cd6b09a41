//! Local persistence for events and programmes.
//!
//! A single `SQLite` file holds both tables:
//!
//! ```text
//! ~/.sortie/sortie.sqlite
//!   event       # one row per event
//!   programme   # one row per programme, `event_id` → event(id) ON DELETE CASCADE
//! ```
//!
//! Instants are stored as ISO-8601 civil date-times (`2026-02-06T20:00:00`).
//! Storage never validates: it only accepts [`NewEvent`](crate::model::NewEvent)
//! and [`NewProgramme`](crate::model::NewProgramme), which the validation
//! functions alone can build.

mod event;
mod programme;

use std::{fs, io, path::Path, path::PathBuf};

use rusqlite::Connection;

/// Errors that can occur during storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("event not found: {0}")]
    EventNotFound(i64),

    #[error("programme not found: {0}")]
    ProgrammeNotFound(i64),

    #[error("corrupt storage: {0}")]
    Corrupt(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

pub type Result<T> = core::result::Result<T, StorageError>;

const SCHEMA: &str = "
    PRAGMA foreign_keys = ON;

    CREATE TABLE IF NOT EXISTS event (
        id          INTEGER PRIMARY KEY AUTOINCREMENT,
        title       TEXT NOT NULL,
        description TEXT NOT NULL,
        kind        TEXT NOT NULL,
        start_at    TEXT,
        end_at      TEXT,
        place       TEXT NOT NULL,
        image       TEXT
    );

    CREATE TABLE IF NOT EXISTS programme (
        id       INTEGER PRIMARY KEY AUTOINCREMENT,
        event_id INTEGER NOT NULL REFERENCES event(id) ON DELETE CASCADE,
        title    TEXT NOT NULL,
        start_at TEXT NOT NULL,
        end_at   TEXT NOT NULL
    );

    CREATE INDEX IF NOT EXISTS programme_event ON programme(event_id);
";

/// `SQLite`-backed storage for events and their programmes.
///
/// Owns one connection. Hand it to callers by reference; tests use
/// [`Storage::in_memory`].
pub struct Storage {
    conn: Connection,
}

impl Storage {
    /// Opens (or creates) the database file at `path`.
    ///
    /// Parent directories are created if they don't exist.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        tracing::info!(path = %path.display(), "opening SQLite database");
        Self::init(Connection::open(path)?)
    }

    /// A throwaway database living only as long as the returned value.
    pub fn in_memory() -> Result<Self> {
        tracing::debug!("opening in-memory SQLite database");
        Self::init(Connection::open_in_memory()?)
    }

    /// Returns the default database path: `~/.sortie/sortie.sqlite`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".sortie").join("sortie.sqlite"))
    }

    fn init(conn: Connection) -> Result<Self> {
        tracing::debug!("ensuring tables in the database");
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn })
    }
}

/// Formats an instant for a TEXT column.
fn encode_instant(at: jiff::civil::DateTime) -> String {
    at.to_string()
}

/// Parses an instant read from a TEXT column.
fn decode_instant(column: &str, raw: &str) -> Result<jiff::civil::DateTime> {
    raw.parse()
        .map_err(|e| StorageError::Corrupt(format!("invalid {column} '{raw}': {e}")))
}
