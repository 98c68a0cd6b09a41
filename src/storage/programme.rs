//! Programme storage.

use rusqlite::{OptionalExtension, Row};

use crate::model::{NewProgramme, Programme};

use super::{Result, Storage, StorageError, decode_instant, encode_instant};

impl Storage {
    /// Inserts a validated programme and returns it with its assigned id.
    ///
    /// Fails with [`StorageError::EventNotFound`] if the event has
    /// disappeared since the programme was validated.
    pub fn create_programme(&self, programme: &NewProgramme) -> Result<Programme> {
        if self.find_event(programme.event_id)?.is_none() {
            return Err(StorageError::EventNotFound(programme.event_id));
        }
        self.conn.execute(
            "INSERT INTO programme (event_id, title, start_at, end_at) VALUES (?1, ?2, ?3, ?4)",
            rusqlite::params![
                programme.event_id,
                &programme.title,
                encode_instant(programme.start),
                encode_instant(programme.end),
            ],
        )?;
        let id = self.conn.last_insert_rowid();
        tracing::debug!(id, event_id = programme.event_id, "inserted programme");
        Ok(programme.clone().into_programme(id))
    }

    pub fn update_programme(&self, id: i64, programme: &NewProgramme) -> Result<Programme> {
        let rows = self.conn.execute(
            "UPDATE programme SET event_id = ?1, title = ?2, start_at = ?3, end_at = ?4
             WHERE id = ?5",
            rusqlite::params![
                programme.event_id,
                &programme.title,
                encode_instant(programme.start),
                encode_instant(programme.end),
                id,
            ],
        )?;
        if rows == 0 {
            return Err(StorageError::ProgrammeNotFound(id));
        }
        Ok(programme.clone().into_programme(id))
    }

    pub fn delete_programme(&self, id: i64) -> Result<()> {
        let rows = self
            .conn
            .execute("DELETE FROM programme WHERE id = ?1", [id])?;
        if rows == 0 {
            return Err(StorageError::ProgrammeNotFound(id));
        }
        Ok(())
    }

    pub fn find_programme(&self, id: i64) -> Result<Option<Programme>> {
        let raw = self
            .conn
            .query_row(
                "SELECT id, event_id, title, start_at, end_at FROM programme WHERE id = ?1",
                [id],
                RawProgramme::from_row,
            )
            .optional()?;
        raw.map(RawProgramme::into_programme).transpose()
    }

    /// Lists all programmes, newest first.
    pub fn list_programmes(&self) -> Result<Vec<Programme>> {
        self.query_programmes(
            "SELECT id, event_id, title, start_at, end_at FROM programme ORDER BY id DESC",
            [],
        )
    }

    /// Lists one event's programmes in the order they happen.
    pub fn list_programmes_for_event(&self, event_id: i64) -> Result<Vec<Programme>> {
        self.query_programmes(
            "SELECT id, event_id, title, start_at, end_at FROM programme
             WHERE event_id = ?1 ORDER BY start_at ASC, id ASC",
            [event_id],
        )
    }

    fn query_programmes(&self, sql: &str, params: impl rusqlite::Params) -> Result<Vec<Programme>> {
        let mut stmt = self.conn.prepare(sql)?;
        let rows = stmt.query_map(params, RawProgramme::from_row)?;
        let mut programmes = Vec::new();
        for raw in rows {
            programmes.push(raw?.into_programme()?);
        }
        Ok(programmes)
    }
}

struct RawProgramme {
    id: i64,
    event_id: i64,
    title: String,
    start_at: String,
    end_at: String,
}

impl RawProgramme {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            event_id: row.get(1)?,
            title: row.get(2)?,
            start_at: row.get(3)?,
            end_at: row.get(4)?,
        })
    }

    fn into_programme(self) -> Result<Programme> {
        Ok(Programme {
            id: self.id,
            event_id: self.event_id,
            title: self.title,
            start: decode_instant("start_at", &self.start_at)?,
            end: decode_instant("end_at", &self.end_at)?,
        })
    }
}
