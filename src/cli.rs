//! CLI interface for sortie.
//!
//! Each subcommand is non-interactive: arguments in, text (or JSON) out.
//! Commands split into two groups:
//!
//! - `sortie event add|list|show|edit|delete`: events.
//! - `sortie programme add|list|edit|delete`: programmes inside events.
//!
//! Dates and times are typed as `yyyy-MM-dd HH:mm`, plain dates as
//! `yyyy-MM-dd`.

mod event;
mod format;
mod programme;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::config::Config;
use crate::model::EventKind;
use crate::query::SortOrder;
use crate::storage::Storage;

pub use event::EventCommand;
pub use programme::ProgrammeCommand;

/// sortie: plan outings and what happens during them.
#[derive(Debug, Parser)]
#[command(name = "sortie", after_long_help = WORKFLOW_HELP)]
pub struct Cli {
    /// Config file (defaults to `~/.sortie/config.toml`).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Database file, overriding the configured one.
    #[arg(long, global = true)]
    pub database: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

const WORKFLOW_HELP: &str = r#"Workflow: planning a camping trip
  1. sortie event add --type camping --title "Camp Zaghouan" \
       --description "Two nights" --place Zaghouan \
       --start "2026-02-06 20:00" --end "2026-02-08 12:00"
     → prints the event ID (e.g. 3)
  2. sortie programme add --event 3 --title Campfire \
       --start "2026-02-06 21:00" --end "2026-02-06 23:00"
  3. sortie event show 3

Browse:
  sortie event list --search atlas --sort start-asc
  sortie event list --type soiree --place tunis --from 2026-02-01"#;

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage events: add, list, show, edit, delete.
    Event {
        #[command(subcommand)]
        command: EventCommand,
    },

    /// Manage the programmes scheduled inside events.
    Programme {
        #[command(subcommand)]
        command: ProgrammeCommand,
    },

    /// List the event types and whether each needs an end date.
    Types,
}

/// CLI-facing event type, mapped to the domain `EventKind`.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum KindArg {
    /// Evening party.
    Soiree,
    /// Hike.
    Randonnee,
    /// Camping trip (end date required).
    Camping,
    /// Multi-day stay (end date required).
    Sejour,
}

impl KindArg {
    fn to_domain(self) -> EventKind {
        match self {
            Self::Soiree => EventKind::Soiree,
            Self::Randonnee => EventKind::Randonnee,
            Self::Camping => EventKind::Camping,
            Self::Sejour => EventKind::Sejour,
        }
    }
}

/// CLI-facing sort order, mapped to the domain `SortOrder`.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SortArg {
    /// Newest first.
    IdDesc,
    /// Earliest start first.
    StartAsc,
    /// Latest start first.
    StartDesc,
    /// Title A→Z.
    TitleAsc,
    /// Title Z→A.
    TitleDesc,
}

impl SortArg {
    fn to_domain(self) -> SortOrder {
        match self {
            Self::IdDesc => SortOrder::IdDesc,
            Self::StartAsc => SortOrder::StartAsc,
            Self::StartDesc => SortOrder::StartDesc,
            Self::TitleAsc => SortOrder::TitleAsc,
            Self::TitleDesc => SortOrder::TitleDesc,
        }
    }
}

/// Run one command, returning an error message on failure.
pub fn run(command: Command, config: &Config, storage: &Storage) -> Result<(), String> {
    match command {
        Command::Event { command } => event::run(command, config, storage),
        Command::Programme { command } => programme::run(command, config, storage),
        Command::Types => {
            cmd_types();
            Ok(())
        }
    }
}

fn cmd_types() {
    for kind in EventKind::ALL {
        let end = if kind.requires_end() {
            "end date required"
        } else {
            "end date optional"
        };
        println!("{kind:<10}  {end}");
    }
}
