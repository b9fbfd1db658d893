/// Playlist song domain types
use crate::types::SongId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A song stored in the playlist collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Song {
    pub id: SongId,
    pub title: String,
    pub artist: String,
    /// Empty when not provided
    pub album: String,
    /// Picture URL or filename, empty when not provided
    pub image: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields accepted when adding or replacing a song
///
/// An update replaces every field, so omitting `album` or `image` resets it
/// to the empty string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SongInput {
    pub title: String,
    pub artist: String,
    #[serde(default)]
    pub album: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

impl SongInput {
    pub fn new(title: impl Into<String>, artist: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            artist: artist.into(),
            album: None,
            image: None,
        }
    }

    pub fn with_album(mut self, album: impl Into<String>) -> Self {
        self.album = Some(album.into());
        self
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    pub fn album_or_default(&self) -> &str {
        self.album.as_deref().unwrap_or_default()
    }

    pub fn image_or_default(&self) -> &str {
        self.image.as_deref().unwrap_or_default()
    }
}
