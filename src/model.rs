//! Core data model for sortie.
//!
//! Events are the top-level outings; programmes are the activities
//! scheduled inside them. Each comes in three shapes: a raw draft as
//! typed by someone, a validated candidate ready for storage, and the
//! stored record carrying its id.

mod event;
mod programme;

pub use event::{Event, EventDraft, EventKind, ImageRef, NewEvent, UnknownEventKind};
pub use programme::{NewProgramme, Programme, ProgrammeDraft};
