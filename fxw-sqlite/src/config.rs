//! Where the deal store keeps its data.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Location of the deal database.
///
/// Without a `database_path` the store is held in memory and disappears with
/// the process. Both fields may be omitted from a configuration file.
///
/// ```
/// use fxw_sqlite::config::SqliteConfig;
///
/// let config = SqliteConfig::file("deals.db");
/// assert!(config.create_if_missing);
///
/// assert!(SqliteConfig::default().database_path.is_none());
/// ```
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SqliteConfig {
    /// The SQLite file, or `None` for a store that lives only in memory
    pub database_path: Option<PathBuf>,

    /// Create the file on open when it does not exist yet
    pub create_if_missing: bool,
}

impl SqliteConfig {
    /// A store backed by the file at `path`, created on first open
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self {
            database_path: Some(path.into()),
            ..Self::default()
        }
    }
}

impl Default for SqliteConfig {
    fn default() -> Self {
        Self {
            database_path: None,
            create_if_missing: true,
        }
    }
}
