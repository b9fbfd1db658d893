use crate::songs;
use async_trait::async_trait;
use muse_core::{error::Result, MuseError, Song, SongId, SongInput, SongStore};
use sqlx::SqlitePool;

/// Song store backed by the local `SQLite` database
#[derive(Debug, Clone)]
pub struct SqliteSongStore {
    pool: SqlitePool,
}

impl SqliteSongStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SongStore for SqliteSongStore {
    async fn list(&self) -> Result<Vec<Song>> {
        songs::get_all(&self.pool).await
    }

    async fn find(&self, id: &SongId) -> Result<Option<Song>> {
        songs::get_by_id(&self.pool, id).await
    }

    async fn add(&self, input: SongInput) -> Result<Song> {
        songs::create(&self.pool, &input).await
    }

    async fn update(&self, id: &SongId, input: SongInput) -> Result<Song> {
        songs::update(&self.pool, id, &input)
            .await?
            .ok_or_else(|| MuseError::not_found("Song", id.as_str()))
    }

    async fn remove(&self, id: &SongId) -> Result<()> {
        if songs::delete(&self.pool, id).await? {
            Ok(())
        } else {
            Err(MuseError::not_found("Song", id.as_str()))
        }
    }
}
