//! Validation: deciding whether a candidate event or programme may be stored.
//!
//! Both checks are pure and single-shot. They report the first rule a
//! candidate breaks and stop there; correcting the input and calling
//! again is the caller's job.

use std::fmt;

use jiff::civil::DateTime;
use serde::{Deserialize, Serialize};

use crate::model::{Event, EventDraft, EventKind, NewEvent, NewProgramme, ProgrammeDraft};

/// How strictly the type-driven end-date requirement is enforced.
///
/// Under `Lenient`, a camping trip or stay without an end date is
/// accepted. A supplied end is range-checked either way.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EndDatePolicy {
    #[default]
    Required,
    Lenient,
}

/// A candidate field that can be missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Title,
    Description,
    Place,
    Start,
    End,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Title => "title",
            Self::Description => "description",
            Self::Place => "place",
            Self::Start => "start date",
            Self::End => "end date",
        })
    }
}

/// The kind of rule a rejected candidate broke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    MissingField,
    InvalidRange,
    OutOfEventBounds,
    /// The programme names an event that does not exist. Raised by the
    /// schedule, never by the validators, which only see loaded parents.
    ParentNotFound,
}

/// Why a candidate was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    MissingField(Field),

    #[error("end date is required for {0} events")]
    MissingEnd(EventKind),

    #[error("end ({end}) must be after start ({start})")]
    InvalidRange { start: DateTime, end: DateTime },

    #[error("programme starts at {start}, before its event starts at {event_start}")]
    StartsBeforeEvent {
        start: DateTime,
        event_start: DateTime,
    },

    #[error("programme ends at {end}, after its event ends at {event_end}")]
    EndsAfterEvent { end: DateTime, event_end: DateTime },
}

impl ValidationError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingField(_) | Self::MissingEnd(_) => ErrorKind::MissingField,
            Self::InvalidRange { .. } => ErrorKind::InvalidRange,
            Self::StartsBeforeEvent { .. } | Self::EndsAfterEvent { .. } => {
                ErrorKind::OutOfEventBounds
            }
        }
    }
}

pub type Result<T> = core::result::Result<T, ValidationError>;

/// Validate a candidate event.
///
/// Checks, in order: title, description and place are non-blank; a start
/// is given; an end is given when the kind requires one (under
/// [`EndDatePolicy::Required`]); any end is strictly after the start.
///
/// On success the text fields come back trimmed and a blank image
/// reference becomes `None`.
pub fn validate_event(draft: &EventDraft, policy: EndDatePolicy) -> Result<NewEvent> {
    let title = required(&draft.title, Field::Title)?;
    let description = required(&draft.description, Field::Description)?;
    let place = required(&draft.place, Field::Place)?;

    let start = draft.start.ok_or(ValidationError::MissingField(Field::Start))?;

    if policy == EndDatePolicy::Required && draft.kind.requires_end() && draft.end.is_none() {
        return Err(ValidationError::MissingEnd(draft.kind));
    }

    if let Some(end) = draft.end {
        ensure_ordered(start, end)?;
    }

    let image = draft
        .image
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from);

    Ok(NewEvent {
        title,
        description,
        kind: draft.kind,
        start,
        end: draft.end,
        place,
        image,
    })
}

/// Validate a candidate programme against the event it belongs to.
///
/// `parent` must already be loaded; an unknown event id is the caller's
/// concern. The programme window has to be well-ordered and sit inside
/// the parent's: no earlier than the event start, and no later than
/// the event end when there is one.
pub fn validate_programme(
    event_id: i64,
    draft: &ProgrammeDraft,
    parent: &Event,
) -> Result<NewProgramme> {
    let title = required(&draft.title, Field::Title)?;
    let start = draft.start.ok_or(ValidationError::MissingField(Field::Start))?;
    let end = draft.end.ok_or(ValidationError::MissingField(Field::End))?;

    ensure_ordered(start, end)?;

    if let Some(event_start) = parent.start
        && start < event_start
    {
        return Err(ValidationError::StartsBeforeEvent { start, event_start });
    }

    if let Some(event_end) = parent.end
        && end > event_end
    {
        return Err(ValidationError::EndsAfterEvent { end, event_end });
    }

    Ok(NewProgramme {
        event_id,
        title,
        start,
        end,
    })
}

fn required(value: &str, field: Field) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::MissingField(field));
    }
    Ok(trimmed.to_string())
}

fn ensure_ordered(start: DateTime, end: DateTime) -> Result<()> {
    if end <= start {
        return Err(ValidationError::InvalidRange { start, end });
    }
    Ok(())
}
