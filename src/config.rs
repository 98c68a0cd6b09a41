//! sortie configuration.
//!
//! Loaded from `~/.sortie/config.toml`, or from the path given by
//! `--config` or `SORTIE_CONFIG`. Every key is optional and a missing
//! default file means defaults.
//!
//! ```toml
//! database = "/path/to/sortie.sqlite"
//! end-date-policy = "required"   # or "lenient"
//! default-sort = "id-desc"
//! ```

use std::path::{Path, PathBuf};
use std::{env, fs, io};

use serde::Deserialize;

use crate::query::SortOrder;
use crate::storage::Storage;
use crate::validate::EndDatePolicy;

const CONFIG_ENV: &str = "SORTIE_CONFIG";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct Config {
    /// Database file. Defaults to `~/.sortie/sortie.sqlite`.
    pub database: Option<PathBuf>,

    /// Whether camping trips and stays must carry an end date.
    pub end_date_policy: EndDatePolicy,

    /// Sort used by `event list` when `--sort` is not given.
    pub default_sort: SortOrder,
}

impl Config {
    /// Load config, checking in order: the explicit path, `SORTIE_CONFIG`,
    /// then `~/.sortie/config.toml`.
    ///
    /// An explicitly named file must exist; the default one may not.
    pub fn load(explicit: Option<&Path>) -> Result<Self, String> {
        if let Some(path) = explicit {
            return Self::read(path);
        }

        if let Ok(path) = env::var(CONFIG_ENV)
            && !path.is_empty()
        {
            return Self::read(Path::new(&path));
        }

        let Some(path) = Self::default_path() else {
            tracing::warn!("could not determine home directory, using default config");
            return Ok(Self::default());
        };

        match Self::read(&path) {
            Err(_) if !path.exists() => {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                Ok(Self::default())
            }
            other => other,
        }
    }

    /// Parse config from a TOML string.
    pub fn parse(contents: &str) -> Result<Self, String> {
        toml::from_str(contents).map_err(|e| e.to_string())
    }

    /// The default config file path: `~/.sortie/config.toml`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".sortie").join("config.toml"))
    }

    /// The database path: configured, or the storage default.
    pub fn database_path(&self) -> Option<PathBuf> {
        self.database.clone().or_else(Storage::default_path)
    }

    fn read(path: &Path) -> Result<Self, String> {
        let contents = fs::read_to_string(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => format!("no config file found at {}", path.display()),
            _ => format!("failed to read {}: {e}", path.display()),
        })?;
        tracing::debug!(path = %path.display(), "loaded config");
        Self::parse(&contents).map_err(|e| format!("invalid config at {}: {e}", path.display()))
    }
}
