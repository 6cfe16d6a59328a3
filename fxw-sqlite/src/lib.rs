#![warn(missing_docs)]
// Note: this overwrites the link in the README to point to the rust docs of the fxw-core crate.
//! [fxw_core]: https://docs.rs/fxw_core/latest/fxw_core/index.html
#![doc = include_str!("../README.md")]

use sqlx::sqlite;
use std::{str::FromStr, time::Duration};
use tokio::try_join;
use tracing::{Level, event};

pub mod config;
mod r#impl;
mod types;

use config::SqliteConfig;

/// The deal store, kept in a single SQLite database.
///
/// `reader` serves lookups and listings over several connections. `writer`
/// holds exactly one, which serializes inserts. The database runs in WAL mode
/// so reads continue during a write.
///
/// ```no_run
/// # use fxw_sqlite::{Db, config::SqliteConfig};
/// # async fn example() -> Result<(), sqlx::Error> {
/// let db = Db::open(&SqliteConfig::file("deals.db")).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Db {
    /// Pool for queries
    pub reader: sqlx::Pool<sqlx::Sqlite>,
    /// Single-connection pool for inserts and migrations
    pub writer: sqlx::Pool<sqlx::Sqlite>,
}

impl Db {
    /// Connect to the database named by `config`, bringing its schema up to
    /// date before returning.
    ///
    /// # Errors
    ///
    /// Fails when the file is missing and may not be created, when it cannot
    /// be opened, or when the schema cannot be migrated.
    pub async fn open(config: &SqliteConfig) -> Result<Self, sqlx::Error> {
        let location = config
            .database_path
            .as_ref()
            .map(|p| p.to_string_lossy().into_owned());

        let options =
            sqlite::SqliteConnectOptions::from_str(location.as_deref().unwrap_or(":memory:"))?
                .busy_timeout(Duration::from_secs(5))
                .foreign_keys(true)
                .journal_mode(sqlite::SqliteJournalMode::Wal)
                .synchronous(sqlite::SqliteSynchronous::Normal)
                .pragma("journal_size_limit", "27103364")
                .pragma("mmap_size", "134217728")
                .pragma("temp_store", "memory")
                .create_if_missing(config.create_if_missing);

        let reader = sqlite::SqlitePoolOptions::new().connect_with(options.clone());
        let writer = sqlite::SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options);

        let (reader, writer) = try_join!(reader, writer)?;

        sqlx::migrate!("./schema").run(&writer).await?;

        event!(
            Level::INFO,
            path = location.as_deref().unwrap_or(":memory:"),
            "opened deal store"
        );

        Ok(Self { reader, writer })
    }
}
