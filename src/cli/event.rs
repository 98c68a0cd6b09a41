//! Event commands: add, list, show, edit, delete.

use clap::{Args, Subcommand};
use jiff::civil::{Date, DateTime};

use crate::config::Config;
use crate::model::{Event, EventDraft};
use crate::query::{EventQuery, SortOrder};
use crate::schedule::Schedule;
use crate::storage::Storage;

use super::format::{event_details, event_line, parse_date, parse_instant, programme_line};
use super::{KindArg, SortArg};

#[derive(Debug, Subcommand)]
pub enum EventCommand {
    /// Create an event. Prints its ID.
    Add {
        #[arg(long)]
        title: String,

        #[arg(long)]
        description: String,

        #[arg(long)]
        place: String,

        #[arg(long = "type", value_enum)]
        kind: KindArg,

        /// Start, as `yyyy-MM-dd HH:mm`.
        #[arg(long, value_parser = parse_instant)]
        start: DateTime,

        /// End, as `yyyy-MM-dd HH:mm`. Required for camping and sejour.
        #[arg(long, value_parser = parse_instant)]
        end: Option<DateTime>,

        /// Image: a file path, `resource:<path>`, or an http(s) URL.
        #[arg(long)]
        image: Option<String>,
    },

    /// List events, optionally searched, filtered, and sorted.
    List(ListArgs),

    /// Show one event with its programmes in chronological order.
    Show { id: i64 },

    /// Edit an event. Fields not given keep their current value.
    Edit {
        id: i64,

        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        description: Option<String>,

        #[arg(long)]
        place: Option<String>,

        #[arg(long = "type", value_enum)]
        kind: Option<KindArg>,

        #[arg(long, value_parser = parse_instant)]
        start: Option<DateTime>,

        #[arg(long, value_parser = parse_instant, conflicts_with = "no_end")]
        end: Option<DateTime>,

        /// Remove the end date.
        #[arg(long)]
        no_end: bool,

        #[arg(long, conflicts_with = "no_image")]
        image: Option<String>,

        /// Remove the image.
        #[arg(long)]
        no_image: bool,
    },

    /// Delete an event and all of its programmes.
    Delete { id: i64 },
}

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Keyword matched against title, description, and place.
    #[arg(long)]
    search: Option<String>,

    #[arg(long = "type", value_enum)]
    kind: Option<KindArg>,

    /// Keyword matched against place only.
    #[arg(long)]
    place: Option<String>,

    /// Earliest start date, inclusive (`yyyy-MM-dd`).
    #[arg(long, value_parser = parse_date)]
    from: Option<Date>,

    /// Latest start date, inclusive (`yyyy-MM-dd`).
    #[arg(long, value_parser = parse_date)]
    to: Option<Date>,

    /// Defaults to the configured `default-sort`.
    #[arg(long, value_enum)]
    sort: Option<SortArg>,

    /// Print JSON instead of one line per event.
    #[arg(long)]
    json: bool,
}

impl ListArgs {
    pub(super) fn to_query(&self, default_sort: SortOrder) -> EventQuery {
        EventQuery {
            keyword: self.search.clone(),
            kind: self.kind.map(KindArg::to_domain),
            place: self.place.clone(),
            from: self.from,
            to: self.to,
            sort: self.sort.map_or(default_sort, SortArg::to_domain),
        }
    }
}

pub(super) fn run(command: EventCommand, config: &Config, storage: &Storage) -> Result<(), String> {
    let schedule = Schedule::new(storage, config.end_date_policy);
    match command {
        EventCommand::Add {
            title,
            description,
            place,
            kind,
            start,
            end,
            image,
        } => {
            let draft = EventDraft {
                title,
                description,
                kind: kind.to_domain(),
                start: Some(start),
                end,
                place,
                image,
            };
            let event = schedule
                .add_event(&draft)
                .map_err(|e| format!("event rejected: {e}"))?;
            println!("{}", event.id);
            Ok(())
        }
        EventCommand::List(args) => {
            cmd_list(storage, &args.to_query(config.default_sort), args.json)
        }
        EventCommand::Show { id } => cmd_show(storage, id),
        EventCommand::Edit {
            id,
            title,
            description,
            place,
            kind,
            start,
            end,
            no_end,
            image,
            no_image,
        } => {
            let existing = require_event(storage, id)?;
            let mut draft = EventDraft::from_event(&existing);
            if let Some(t) = title {
                draft.title = t;
            }
            if let Some(d) = description {
                draft.description = d;
            }
            if let Some(p) = place {
                draft.place = p;
            }
            if let Some(k) = kind {
                draft.kind = k.to_domain();
            }
            if start.is_some() {
                draft.start = start;
            }
            if no_end {
                draft.end = None;
            } else if end.is_some() {
                draft.end = end;
            }
            if no_image {
                draft.image = None;
            } else if image.is_some() {
                draft.image = image;
            }

            let event = schedule
                .edit_event(id, &draft)
                .map_err(|e| format!("event rejected: {e}"))?;
            eprintln!("Event {} updated", event.id);
            Ok(())
        }
        EventCommand::Delete { id } => cmd_delete(storage, id),
    }
}

fn cmd_list(storage: &Storage, query: &EventQuery, json: bool) -> Result<(), String> {
    let events = storage
        .list_events()
        .map_err(|e| format!("failed to list events: {e}"))?;
    let events = query.apply(&events);

    if json {
        let out = serde_json::to_string_pretty(&events)
            .map_err(|e| format!("failed to serialize events: {e}"))?;
        println!("{out}");
        return Ok(());
    }

    if events.is_empty() {
        println!("No events");
        return Ok(());
    }
    for e in &events {
        println!("{}", event_line(e));
    }
    eprintln!("{} event(s)", events.len());
    Ok(())
}

fn cmd_show(storage: &Storage, id: i64) -> Result<(), String> {
    let event = require_event(storage, id)?;
    let programmes = storage
        .list_programmes_for_event(id)
        .map_err(|e| format!("failed to load programmes: {e}"))?;

    println!("{}", event_details(&event));
    println!();
    if programmes.is_empty() {
        println!("No programmes");
    } else {
        println!("Programmes ({}):", programmes.len());
        for p in &programmes {
            println!("{}", programme_line(p));
        }
    }
    Ok(())
}

fn cmd_delete(storage: &Storage, id: i64) -> Result<(), String> {
    let event = require_event(storage, id)?;
    let programmes = storage
        .list_programmes_for_event(id)
        .map_err(|e| format!("failed to load programmes: {e}"))?;
    storage
        .delete_event(id)
        .map_err(|e| format!("failed to delete event: {e}"))?;

    eprintln!(
        "Event {id} deleted ({}), with {} programme(s)",
        event.title,
        programmes.len()
    );
    Ok(())
}

/// Load an event by id, or explain that it doesn't exist.
pub(super) fn require_event(storage: &Storage, id: i64) -> Result<Event, String> {
    storage
        .find_event(id)
        .map_err(|e| format!("failed to load event: {e}"))?
        .ok_or_else(|| format!("no event with id {id}"))
}
