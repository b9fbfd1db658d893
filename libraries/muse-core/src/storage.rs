//! Store traits for users and playlist songs
//!
//! Implementations live in `muse-storage`; the server only sees these traits.

use crate::error::Result;
use crate::types::{NewUser, ProfileUpdate, Song, SongId, SongInput, User};
use async_trait::async_trait;

/// Persistent user accounts keyed by unique username
#[async_trait]
pub trait UserStore: Send + Sync {
    /// All users in storage order
    async fn list(&self) -> Result<Vec<User>>;

    /// Look up one user; `Ok(None)` when absent
    async fn find(&self, username: &str) -> Result<Option<User>>;

    /// Insert a new user
    ///
    /// Fails with `MuseError::Duplicate` when the username is taken, leaving
    /// storage untouched.
    async fn create(&self, user: NewUser) -> Result<User>;

    /// Overwrite the mutable profile fields of an existing user
    ///
    /// Fails with `MuseError::NotFound` when the username is absent.
    async fn update_profile(&self, username: &str, update: ProfileUpdate) -> Result<User>;

    /// Convenience lookup that turns absence into `MuseError::NotFound`
    async fn get(&self, username: &str) -> Result<User> {
        self.find(username)
            .await?
            .ok_or_else(|| crate::MuseError::not_found("User", username))
    }
}

/// Persistent playlist song collection
#[async_trait]
pub trait SongStore: Send + Sync {
    /// All songs, newest first
    async fn list(&self) -> Result<Vec<Song>>;

    /// Look up one song; `Ok(None)` when absent
    async fn find(&self, id: &SongId) -> Result<Option<Song>>;

    /// Insert a song with a fresh ID and timestamps
    async fn add(&self, input: SongInput) -> Result<Song>;

    /// Replace every field of an existing song
    ///
    /// Fails with `MuseError::NotFound` when the ID does not exist.
    async fn update(&self, id: &SongId, input: SongInput) -> Result<Song>;

    /// Delete a song
    ///
    /// Fails with `MuseError::NotFound` when the ID does not exist.
    async fn remove(&self, id: &SongId) -> Result<()>;
}
