//! Event storage: create, load, update, delete, and list events.

use rusqlite::{OptionalExtension, Row};

use crate::model::{Event, EventKind, NewEvent};

use super::{Result, Storage, StorageError, decode_instant, encode_instant};

const COLUMNS: &str = "id, title, description, kind, start_at, end_at, place, image";

impl Storage {
    /// Inserts a validated event and returns it with its assigned id.
    pub fn create_event(&self, event: &NewEvent) -> Result<Event> {
        self.conn.execute(
            "INSERT INTO event (title, description, kind, start_at, end_at, place, image)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            rusqlite::params![
                &event.title,
                &event.description,
                event.kind.as_str(),
                encode_instant(event.start),
                event.end.map(encode_instant),
                &event.place,
                &event.image,
            ],
        )?;
        let id = self.conn.last_insert_rowid();
        tracing::debug!(id, "inserted event");
        Ok(event.clone().into_event(id))
    }

    /// Replaces every field of an existing event.
    pub fn update_event(&self, id: i64, event: &NewEvent) -> Result<Event> {
        let rows = self.conn.execute(
            "UPDATE event
             SET title = ?1, description = ?2, kind = ?3, start_at = ?4, end_at = ?5,
                 place = ?6, image = ?7
             WHERE id = ?8",
            rusqlite::params![
                &event.title,
                &event.description,
                event.kind.as_str(),
                encode_instant(event.start),
                event.end.map(encode_instant),
                &event.place,
                &event.image,
                id,
            ],
        )?;
        if rows == 0 {
            return Err(StorageError::EventNotFound(id));
        }
        Ok(event.clone().into_event(id))
    }

    /// Deletes an event. Its programmes go with it.
    pub fn delete_event(&self, id: i64) -> Result<()> {
        let rows = self
            .conn
            .execute("DELETE FROM event WHERE id = ?1", [id])?;
        if rows == 0 {
            return Err(StorageError::EventNotFound(id));
        }
        Ok(())
    }

    /// Loads a single event, or `None` if no event has this id.
    pub fn find_event(&self, id: i64) -> Result<Option<Event>> {
        let raw = self
            .conn
            .query_row(
                &format!("SELECT {COLUMNS} FROM event WHERE id = ?1"),
                [id],
                RawEvent::from_row,
            )
            .optional()?;
        raw.map(RawEvent::into_event).transpose()
    }

    /// Lists all events, newest first.
    pub fn list_events(&self) -> Result<Vec<Event>> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT {COLUMNS} FROM event ORDER BY id DESC"))?;
        let rows = stmt.query_map([], RawEvent::from_row)?;
        let mut events = Vec::new();
        for raw in rows {
            events.push(raw?.into_event()?);
        }
        Ok(events)
    }
}

/// Column values of one event row, before parsing.
struct RawEvent {
    id: i64,
    title: String,
    description: String,
    kind: String,
    start_at: Option<String>,
    end_at: Option<String>,
    place: String,
    image: Option<String>,
}

impl RawEvent {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            title: row.get(1)?,
            description: row.get(2)?,
            kind: row.get(3)?,
            start_at: row.get(4)?,
            end_at: row.get(5)?,
            place: row.get(6)?,
            image: row.get(7)?,
        })
    }

    fn into_event(self) -> Result<Event> {
        let kind = self
            .kind
            .parse::<EventKind>()
            .map_err(|e| StorageError::Corrupt(format!("event {}: {e}", self.id)))?;
        let start = self
            .start_at
            .as_deref()
            .map(|s| decode_instant("start_at", s))
            .transpose()?;
        let end = self
            .end_at
            .as_deref()
            .map(|s| decode_instant("end_at", s))
            .transpose()?;

        Ok(Event {
            id: self.id,
            title: self.title,
            description: self.description,
            kind,
            start,
            end,
            place: self.place,
            image: self.image.filter(|s| !s.trim().is_empty()),
        })
    }
}
