//! Schedule: validate, then persist.
//!
//! Every create and update goes through here so that nothing reaches
//! storage without passing validation first. A programme's parent event
//! is loaded fresh from storage before its window is checked.

use crate::model::{Event, EventDraft, Programme, ProgrammeDraft};
use crate::storage::{Storage, StorageError};
use crate::validate::{self, EndDatePolicy, ErrorKind, ValidationError};

/// Why a schedule operation failed.
#[derive(Debug, thiserror::Error)]
pub enum ScheduleError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    #[error("no event with id {0}")]
    ParentNotFound(i64),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl ScheduleError {
    /// The rule this failure broke. `None` for storage failures.
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            Self::Invalid(e) => Some(e.kind()),
            Self::ParentNotFound(_) => Some(ErrorKind::ParentNotFound),
            Self::Storage(_) => None,
        }
    }
}

pub type Result<T> = core::result::Result<T, ScheduleError>;

/// Validate-then-persist operations over a borrowed [`Storage`].
pub struct Schedule<'a> {
    storage: &'a Storage,
    policy: EndDatePolicy,
}

impl<'a> Schedule<'a> {
    pub fn new(storage: &'a Storage, policy: EndDatePolicy) -> Self {
        Self { storage, policy }
    }

    pub fn add_event(&self, draft: &EventDraft) -> Result<Event> {
        let new = validate::validate_event(draft, self.policy).inspect_err(reject)?;
        let event = self.storage.create_event(&new)?;
        tracing::info!(id = event.id, kind = %event.kind, "event added");
        Ok(event)
    }

    /// Replaces an event's fields. Its existing programmes are not re-checked.
    pub fn edit_event(&self, id: i64, draft: &EventDraft) -> Result<Event> {
        let new = validate::validate_event(draft, self.policy).inspect_err(reject)?;
        let event = self.storage.update_event(id, &new)?;
        tracing::info!(id, "event updated");
        Ok(event)
    }

    pub fn add_programme(&self, event_id: i64, draft: &ProgrammeDraft) -> Result<Programme> {
        let parent = self.parent(event_id)?;
        let new = validate::validate_programme(event_id, draft, &parent).inspect_err(reject)?;
        let programme = self.storage.create_programme(&new)?;
        tracing::info!(id = programme.id, event_id, "programme added");
        Ok(programme)
    }

    /// Replaces a programme's fields, re-checking it against its event.
    pub fn edit_programme(&self, id: i64, draft: &ProgrammeDraft) -> Result<Programme> {
        let existing = self
            .storage
            .find_programme(id)?
            .ok_or(StorageError::ProgrammeNotFound(id))?;
        let parent = self.parent(existing.event_id)?;
        let new =
            validate::validate_programme(existing.event_id, draft, &parent).inspect_err(reject)?;
        let programme = self.storage.update_programme(id, &new)?;
        tracing::info!(id, "programme updated");
        Ok(programme)
    }

    fn parent(&self, event_id: i64) -> Result<Event> {
        self.storage
            .find_event(event_id)?
            .ok_or(ScheduleError::ParentNotFound(event_id))
    }
}

fn reject(err: &ValidationError) {
    tracing::debug!(kind = ?err.kind(), "rejected: {err}");
}

#[cfg(test)]
mod tests {
    use super::*;

    use jiff::civil::{DateTime, date};

    use crate::model::EventKind;

    fn at(day: i8, hour: i8) -> DateTime {
        date(2026, 2, day).at(hour, 0, 0, 0)
    }

    fn camping(end: Option<DateTime>) -> EventDraft {
        EventDraft {
            title: "Camp Zaghouan".into(),
            description: "Two nights".into(),
            kind: EventKind::Camping,
            start: Some(at(6, 20)),
            end,
            place: "Zaghouan".into(),
            image: None,
        }
    }

    fn programme(start: DateTime, end: DateTime) -> ProgrammeDraft {
        ProgrammeDraft {
            title: "Campfire".into(),
            start: Some(start),
            end: Some(end),
        }
    }

    #[test]
    fn rejected_event_is_not_stored() {
        let storage = Storage::in_memory().unwrap();
        let schedule = Schedule::new(&storage, EndDatePolicy::Required);

        let err = schedule.add_event(&camping(None)).unwrap_err();

        assert_eq!(err.kind(), Some(ErrorKind::MissingField));
        assert!(storage.list_events().unwrap().is_empty());
    }

    #[test]
    fn lenient_schedule_stores_camping_without_end() {
        let storage = Storage::in_memory().unwrap();
        let schedule = Schedule::new(&storage, EndDatePolicy::Lenient);

        let event = schedule.add_event(&camping(None)).unwrap();

        assert_eq!(storage.find_event(event.id).unwrap().unwrap().end, None);
    }

    #[test]
    fn programme_for_unknown_event_is_parent_not_found() {
        let storage = Storage::in_memory().unwrap();
        let schedule = Schedule::new(&storage, EndDatePolicy::Required);

        let err = schedule
            .add_programme(404, &programme(at(6, 21), at(6, 22)))
            .unwrap_err();

        assert!(matches!(err, ScheduleError::ParentNotFound(404)));
        assert_eq!(err.kind(), Some(ErrorKind::ParentNotFound));
        assert!(storage.list_programmes().unwrap().is_empty());
    }

    #[test]
    fn programme_is_checked_against_stored_parent() {
        let storage = Storage::in_memory().unwrap();
        let schedule = Schedule::new(&storage, EndDatePolicy::Required);
        let event = schedule.add_event(&camping(Some(at(8, 12)))).unwrap();

        let err = schedule
            .add_programme(event.id, &programme(at(6, 19), at(6, 22)))
            .unwrap_err();
        assert_eq!(err.kind(), Some(ErrorKind::OutOfEventBounds));

        let ok = schedule
            .add_programme(event.id, &programme(at(6, 21), at(6, 22)))
            .unwrap();
        assert_eq!(storage.list_programmes_for_event(event.id).unwrap(), vec![ok]);
    }

    #[test]
    fn edit_programme_rechecks_window() {
        let storage = Storage::in_memory().unwrap();
        let schedule = Schedule::new(&storage, EndDatePolicy::Required);
        let event = schedule.add_event(&camping(Some(at(8, 12)))).unwrap();
        let p = schedule
            .add_programme(event.id, &programme(at(6, 21), at(6, 22)))
            .unwrap();

        let err = schedule
            .edit_programme(p.id, &programme(at(8, 10), at(8, 14)))
            .unwrap_err();
        assert_eq!(err.kind(), Some(ErrorKind::OutOfEventBounds));

        let edited = schedule
            .edit_programme(p.id, &programme(at(7, 9), at(7, 11)))
            .unwrap();
        assert_eq!(storage.find_programme(p.id).unwrap(), Some(edited));
    }

    #[test]
    fn edit_unknown_event_is_storage_error() {
        let storage = Storage::in_memory().unwrap();
        let schedule = Schedule::new(&storage, EndDatePolicy::Required);

        let err = schedule
            .edit_event(5, &camping(Some(at(8, 12))))
            .unwrap_err();

        assert!(matches!(
            err,
            ScheduleError::Storage(StorageError::EventNotFound(5))
        ));
    }
}
