//! Event types: the top-level scheduled occurrence.

use std::{fmt, str::FromStr};

use jiff::civil::DateTime;
use serde::{Deserialize, Serialize};

/// What kind of outing an event is.
///
/// A closed set. Anything presenting a type chooser should iterate
/// [`EventKind::ALL`] rather than hard-coding names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventKind {
    /// An evening party.
    Soiree,
    /// A hike.
    Randonnee,
    /// A camping trip, spanning nights.
    Camping,
    /// A multi-day stay.
    Sejour,
}

impl EventKind {
    /// Every kind, in presentation order.
    pub const ALL: [Self; 4] = [Self::Soiree, Self::Randonnee, Self::Camping, Self::Sejour];

    /// Whether events of this kind must carry an end date.
    ///
    /// Camping trips and stays span several days, so their window
    /// is meaningless without an end.
    pub fn requires_end(self) -> bool {
        matches!(self, Self::Camping | Self::Sejour)
    }

    /// The canonical upper-case name, as stored.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Soiree => "SOIREE",
            Self::Randonnee => "RANDONNEE",
            Self::Camping => "CAMPING",
            Self::Sejour => "SEJOUR",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Text that names none of the [`EventKind`]s.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown event type '{0}' (expected one of SOIREE, RANDONNEE, CAMPING, SEJOUR)")]
pub struct UnknownEventKind(pub String);

impl FromStr for EventKind {
    type Err = UnknownEventKind;

    /// Case-insensitive, surrounding whitespace ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|k| k.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownEventKind(s.to_string()))
    }
}

/// A stored event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub kind: EventKind,
    /// Always set on write. Rows written by older tools may lack it.
    pub start: Option<DateTime>,
    pub end: Option<DateTime>,
    pub place: String,
    pub image: Option<String>,
}

impl Event {
    /// The image reference, classified.
    pub fn image_ref(&self) -> Option<ImageRef<'_>> {
        self.image.as_deref().map(ImageRef::classify)
    }
}

/// A candidate event exactly as a collaborator collected it.
///
/// Nothing here is trusted: text may be blank or padded, and the
/// start may be missing. Run it through
/// [`validate_event`](crate::validate::validate_event) to get a [`NewEvent`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventDraft {
    pub title: String,
    pub description: String,
    pub kind: EventKind,
    pub start: Option<DateTime>,
    pub end: Option<DateTime>,
    pub place: String,
    pub image: Option<String>,
}

impl EventDraft {
    /// A draft pre-filled from an existing event, for editing.
    pub fn from_event(event: &Event) -> Self {
        Self {
            title: event.title.clone(),
            description: event.description.clone(),
            kind: event.kind,
            start: event.start,
            end: event.end,
            place: event.place.clone(),
            image: event.image.clone(),
        }
    }
}

/// A validated, trimmed event ready for storage.
///
/// Only [`validate_event`](crate::validate::validate_event) builds one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEvent {
    pub(crate) title: String,
    pub(crate) description: String,
    pub(crate) kind: EventKind,
    pub(crate) start: DateTime,
    pub(crate) end: Option<DateTime>,
    pub(crate) place: String,
    pub(crate) image: Option<String>,
}

impl NewEvent {
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn kind(&self) -> EventKind {
        self.kind
    }

    pub fn start(&self) -> DateTime {
        self.start
    }

    pub fn end(&self) -> Option<DateTime> {
        self.end
    }

    /// Attaches the id storage assigned.
    pub fn into_event(self, id: i64) -> Event {
        Event {
            id,
            title: self.title,
            description: self.description,
            kind: self.kind,
            start: Some(self.start),
            end: self.end,
            place: self.place,
            image: self.image,
        }
    }
}

/// Where an event's image lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageRef<'a> {
    /// `http://` or `https://` address.
    Url(&'a str),
    /// Bundled resource, written with a `resource:` prefix.
    Resource(&'a str),
    /// Anything else: a path on the local filesystem.
    File(&'a str),
}

impl<'a> ImageRef<'a> {
    pub fn classify(reference: &'a str) -> Self {
        let lower = reference.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            Self::Url(reference)
        } else if let Some(rest) = reference.strip_prefix("resource:") {
            Self::Resource(rest)
        } else {
            Self::File(reference)
        }
    }
}

impl fmt::Display for ImageRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Url(u) => write!(f, "{u} (url)"),
            Self::Resource(r) => write!(f, "{r} (resource)"),
            Self::File(p) => write!(f, "{p} (file)"),
        }
    }
}
