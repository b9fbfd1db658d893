//! Playlist song queries
//!
//! Each function is a single SQL statement, so each is atomic on its own.
//! Timestamps are stored as unix milliseconds.

use chrono::{DateTime, Utc};
use muse_core::{error::Result, MuseError, Song, SongId, SongInput};
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};

const SONG_COLUMNS: &str = "id, title, artist, album, image, created_at, updated_at";

fn timestamp(row: &SqliteRow, column: &str) -> Result<DateTime<Utc>> {
    let millis: i64 = row.try_get(column)?;
    DateTime::from_timestamp_millis(millis)
        .ok_or_else(|| MuseError::storage(format!("Invalid {} value: {}", column, millis)))
}

fn song_from_row(row: &SqliteRow) -> Result<Song> {
    Ok(Song {
        id: row.try_get("id")?,
        title: row.try_get("title")?,
        artist: row.try_get("artist")?,
        album: row.try_get("album")?,
        image: row.try_get("image")?,
        created_at: timestamp(row, "created_at")?,
        updated_at: timestamp(row, "updated_at")?,
    })
}

/// Get all songs, newest first
///
/// Songs created in the same millisecond keep insertion order, newest first.
pub async fn get_all(pool: &SqlitePool) -> Result<Vec<Song>> {
    let rows = sqlx::query(&format!(
        "SELECT {} FROM songs ORDER BY created_at DESC, rowid DESC",
        SONG_COLUMNS
    ))
    .fetch_all(pool)
    .await?;

    rows.iter().map(song_from_row).collect()
}

/// Get song by ID
pub async fn get_by_id(pool: &SqlitePool, id: &SongId) -> Result<Option<Song>> {
    let row = sqlx::query(&format!("SELECT {} FROM songs WHERE id = ?", SONG_COLUMNS))
        .bind(id)
        .fetch_optional(pool)
        .await?;

    row.as_ref().map(song_from_row).transpose()
}

/// Insert a new song with a generated ID
pub async fn create(pool: &SqlitePool, input: &SongInput) -> Result<Song> {
    let id = SongId::generate();
    let now = Utc::now().timestamp_millis();

    let row = sqlx::query(&format!(
        r#"
        INSERT INTO songs (id, title, artist, album, image, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        RETURNING {}
        "#,
        SONG_COLUMNS
    ))
    .bind(&id)
    .bind(&input.title)
    .bind(&input.artist)
    .bind(input.album_or_default())
    .bind(input.image_or_default())
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await?;

    song_from_row(&row)
}

/// Replace every field of a song
///
/// Returns `Ok(None)` when no song has this ID.
pub async fn update(pool: &SqlitePool, id: &SongId, input: &SongInput) -> Result<Option<Song>> {
    let now = Utc::now().timestamp_millis();

    let row = sqlx::query(&format!(
        r#"
        UPDATE songs
        SET title = ?, artist = ?, album = ?, image = ?, updated_at = ?
        WHERE id = ?
        RETURNING {}
        "#,
        SONG_COLUMNS
    ))
    .bind(&input.title)
    .bind(&input.artist)
    .bind(input.album_or_default())
    .bind(input.image_or_default())
    .bind(now)
    .bind(id)
    .fetch_optional(pool)
    .await?;

    row.as_ref().map(song_from_row).transpose()
}

/// Delete a song
///
/// Returns `false` when no song has this ID.
pub async fn delete(pool: &SqlitePool, id: &SongId) -> Result<bool> {
    let result = sqlx::query("DELETE FROM songs WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
