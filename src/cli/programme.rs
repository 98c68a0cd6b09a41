//! Programme commands: add, list, edit, delete.

use clap::Subcommand;
use jiff::civil::DateTime;

use crate::config::Config;
use crate::model::ProgrammeDraft;
use crate::query::sort_programmes_chronologically;
use crate::schedule::Schedule;
use crate::storage::Storage;

use super::event::require_event;
use super::format::{parse_instant, programme_line};

#[derive(Debug, Subcommand)]
pub enum ProgrammeCommand {
    /// Schedule a programme inside an event. Prints its ID.
    ///
    /// The programme must start no earlier than the event and, when the
    /// event has an end date, finish no later than it.
    Add {
        /// ID of the event this programme belongs to.
        #[arg(long)]
        event: i64,

        #[arg(long)]
        title: String,

        #[arg(long, value_parser = parse_instant)]
        start: DateTime,

        #[arg(long, value_parser = parse_instant)]
        end: DateTime,
    },

    /// List programmes in chronological order.
    List {
        /// Only this event's programmes.
        #[arg(long)]
        event: Option<i64>,

        /// Print JSON instead of one line per programme.
        #[arg(long)]
        json: bool,
    },

    /// Edit a programme. Fields not given keep their current value.
    Edit {
        id: i64,

        #[arg(long)]
        title: Option<String>,

        #[arg(long, value_parser = parse_instant)]
        start: Option<DateTime>,

        #[arg(long, value_parser = parse_instant)]
        end: Option<DateTime>,
    },

    /// Delete a programme.
    Delete { id: i64 },
}

pub(super) fn run(
    command: ProgrammeCommand,
    config: &Config,
    storage: &Storage,
) -> Result<(), String> {
    let schedule = Schedule::new(storage, config.end_date_policy);
    match command {
        ProgrammeCommand::Add {
            event,
            title,
            start,
            end,
        } => {
            let draft = ProgrammeDraft {
                title,
                start: Some(start),
                end: Some(end),
            };
            let programme = schedule
                .add_programme(event, &draft)
                .map_err(|e| format!("programme rejected: {e}"))?;
            println!("{}", programme.id);
            Ok(())
        }
        ProgrammeCommand::List { event, json } => cmd_list(storage, event, json),
        ProgrammeCommand::Edit {
            id,
            title,
            start,
            end,
        } => {
            let existing = storage
                .find_programme(id)
                .map_err(|e| format!("failed to load programme: {e}"))?
                .ok_or_else(|| format!("no programme with id {id}"))?;
            let mut draft = ProgrammeDraft::from_programme(&existing);
            if let Some(t) = title {
                draft.title = t;
            }
            if start.is_some() {
                draft.start = start;
            }
            if end.is_some() {
                draft.end = end;
            }

            schedule
                .edit_programme(id, &draft)
                .map_err(|e| format!("programme rejected: {e}"))?;
            eprintln!("Programme {id} updated");
            Ok(())
        }
        ProgrammeCommand::Delete { id } => {
            storage
                .delete_programme(id)
                .map_err(|e| format!("failed to delete programme: {e}"))?;
            eprintln!("Programme {id} deleted");
            Ok(())
        }
    }
}

fn cmd_list(storage: &Storage, event: Option<i64>, json: bool) -> Result<(), String> {
    let programmes = match event {
        Some(id) => {
            require_event(storage, id)?;
            storage.list_programmes_for_event(id)
        }
        None => storage.list_programmes(),
    }
    .map_err(|e| format!("failed to list programmes: {e}"))?;
    let programmes = sort_programmes_chronologically(&programmes);

    if json {
        let out = serde_json::to_string_pretty(&programmes)
            .map_err(|e| format!("failed to serialize programmes: {e}"))?;
        println!("{out}");
        return Ok(());
    }

    if programmes.is_empty() {
        println!("No programmes");
        return Ok(());
    }
    for p in &programmes {
        println!("{}", programme_line(p));
    }
    Ok(())
}
