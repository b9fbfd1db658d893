//! Muse Storage
//!
//! Persistence for Muse user accounts and playlist songs.
//!
//! # Architecture
//!
//! - **Users**: a flat JSON file rewritten wholesale on every mutation, with
//!   writes serialized behind an async mutex
//! - **Songs**: an embedded `SQLite` database, one atomic statement per
//!   operation
//! - **Vertical Slicing**: each collection owns its own queries and logic
//!
//! # Example
//!
//! ```rust,no_run
//! use muse_storage::{create_pool, run_migrations, JsonUserStore, SqliteSongStore};
//! use muse_core::{SongStore, UserStore};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = create_pool("sqlite://muse.db").await?;
//! run_migrations(&pool).await?;
//!
//! let songs = SqliteSongStore::new(pool);
//! let users = JsonUserStore::new("users.json");
//! users.initialize().await?;
//!
//! let all = songs.list().await?;
//! let profiles = users.list().await?;
//! # Ok(())
//! # }
//! ```

mod context;
mod error;

// Vertical slices
pub mod songs;
pub mod users;

pub use context::SqliteSongStore;
pub use error::StorageError;
pub use users::JsonUserStore;

use sqlx::migrate::Migrator;
use sqlx::sqlite::SqlitePool;

// Embed migrations into binary
static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Run database migrations
///
/// Call once at startup, before any song query.
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), StorageError> {
    MIGRATOR
        .run(pool)
        .await
        .map_err(|e| StorageError::Migration(e.to_string()))
}

/// Create a new `SQLite` pool
///
/// # Arguments
///
/// * `database_url` - `SQLite` connection string (e.g., `<sqlite://muse.db>`)
///
/// The database file and its parent directory are created if missing.
pub async fn create_pool(database_url: &str) -> Result<SqlitePool, StorageError> {
    use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
    use std::str::FromStr;

    tracing::debug!("Creating pool with URL: {}", database_url);

    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(std::time::Duration::from_secs(30));

    if let Some(parent) = options.get_filename().parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await?;
        }
    }

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

    tracing::debug!("Pool created successfully");

    Ok(pool)
}
