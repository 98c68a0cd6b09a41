//! Programme types: sub-activities scheduled inside an event.

use jiff::civil::DateTime;
use serde::{Deserialize, Serialize};

/// A stored programme, linked to its event by id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Programme {
    pub id: i64,
    pub event_id: i64,
    pub title: String,
    pub start: DateTime,
    pub end: DateTime,
}

/// A candidate programme as collected, before validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgrammeDraft {
    pub title: String,
    pub start: Option<DateTime>,
    pub end: Option<DateTime>,
}

impl ProgrammeDraft {
    pub fn from_programme(programme: &Programme) -> Self {
        Self {
            title: programme.title.clone(),
            start: Some(programme.start),
            end: Some(programme.end),
        }
    }
}

/// A validated programme bound to an existing event.
///
/// Only [`validate_programme`](crate::validate::validate_programme) builds one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProgramme {
    pub(crate) event_id: i64,
    pub(crate) title: String,
    pub(crate) start: DateTime,
    pub(crate) end: DateTime,
}

impl NewProgramme {
    pub fn event_id(&self) -> i64 {
        self.event_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn into_programme(self, id: i64) -> Programme {
        Programme {
            id,
            event_id: self.event_id,
            title: self.title,
            start: self.start,
            end: self.end,
        }
    }
}
