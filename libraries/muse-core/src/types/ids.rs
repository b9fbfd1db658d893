/// ID types for Muse entities
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

#[cfg(feature = "sqlx-support")]
use sqlx::{
    encode::IsNull,
    error::BoxDynError,
    sqlite::{SqliteArgumentValue, SqliteTypeInfo, SqliteValueRef},
    Decode, Encode, Sqlite, Type,
};

/// Song identifier, assigned once at creation and never reused
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SongId(String);

impl SongId {
    /// Wrap an existing song ID
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a new random song ID
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Get the inner string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SongId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(feature = "sqlx-support")]
impl Type<Sqlite> for SongId {
    fn type_info() -> SqliteTypeInfo {
        <String as Type<Sqlite>>::type_info()
    }
}

#[cfg(feature = "sqlx-support")]
impl<'q> Encode<'q, Sqlite> for SongId {
    fn encode_by_ref(
        &self,
        args: &mut Vec<SqliteArgumentValue<'q>>,
    ) -> Result<IsNull, BoxDynError> {
        <String as Encode<Sqlite>>::encode_by_ref(&self.0, args)
    }
}

#[cfg(feature = "sqlx-support")]
impl<'r> Decode<'r, Sqlite> for SongId {
    fn decode(value: SqliteValueRef<'r>) -> Result<Self, BoxDynError> {
        let s = <String as Decode<Sqlite>>::decode(value)?;
        Ok(SongId(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn song_id_generation_creates_unique_ids() {
        let id1 = SongId::generate();
        let id2 = SongId::generate();
        assert_ne!(id1, id2);
    }

    #[test]
    fn song_id_display() {
        let id = SongId::new("song-456");
        assert_eq!(format!("{}", id), "song-456");
        assert_eq!(id.as_str(), "song-456");
    }

    #[test]
    fn song_id_serializes_as_plain_string() {
        let id = SongId::new("song-1");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"song-1\"");
    }
}
