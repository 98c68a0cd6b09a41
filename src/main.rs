use std::process;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use sortie::cli::{self, Cli};
use sortie::config::Config;
use sortie::storage::Storage;

const LOG_ENV: &str = "SORTIE_LOG";

fn main() {
    init_tracing();

    let cli = Cli::parse();

    let config = match Config::load(cli.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load config: {e}");
            process::exit(1);
        }
    };

    let Some(path) = cli.database.clone().or_else(|| config.database_path()) else {
        eprintln!("Could not determine home directory.");
        process::exit(1);
    };

    let storage = match Storage::open(&path) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Failed to initialize storage: {e}");
            process::exit(1);
        }
    };

    if let Err(e) = cli::run(cli.command, &config, &storage) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

/// Logs go to stderr, filtered by `SORTIE_LOG` (default `warn`).
fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
