/// Playlist song API routes
use crate::{api::extract::ValidJson, error::Result, state::AppState};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use muse_core::{validation, Song, SongId, SongInput};

/// GET /api/playlist
/// All songs, newest first
pub async fn list_songs(State(app_state): State<AppState>) -> Result<Json<Vec<Song>>> {
    let songs = app_state.songs.list().await?;
    Ok(Json(songs))
}

/// POST /api/playlist
pub async fn add_song(
    State(app_state): State<AppState>,
    ValidJson(input): ValidJson<SongInput>,
) -> Result<(StatusCode, Json<Song>)> {
    validation::validate_song(&input)?;

    let song = app_state.songs.add(input).await?;
    tracing::info!("Added song {} ({})", song.id, song.title);
    Ok((StatusCode::CREATED, Json(song)))
}

/// PUT /api/playlist/:id
/// Replace every field of a song
pub async fn update_song(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
    ValidJson(input): ValidJson<SongInput>,
) -> Result<Json<Song>> {
    validation::validate_song(&input)?;

    let song = app_state.songs.update(&SongId::new(id), input).await?;
    Ok(Json(song))
}

/// DELETE /api/playlist/:id
pub async fn delete_song(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
) -> Result<Json<serde_json::Value>> {
    let song_id = SongId::new(id);
    app_state.songs.remove(&song_id).await?;
    tracing::info!("Deleted song {}", song_id);
    Ok(Json(serde_json::json!({ "success": true })))
}
