/// Storage-specific errors
use muse_core::MuseError;
use thiserror::Error;

/// Result type alias using `StorageError`
pub type Result<T> = std::result::Result<T, StorageError>;

/// Storage error types
#[derive(Error, Debug)]
pub enum StorageError {
    /// Database connection error
    #[error("Database connection error: {0}")]
    Connection(String),

    /// Entity not found
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Migration error
    #[error("Migration error: {0}")]
    Migration(String),

    /// Stored data could not be read back
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Database error from `SQLx`
    #[error(transparent)]
    Database(#[from] sqlx::Error),

    /// I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl StorageError {
    /// Create a not found error
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }
}

impl From<StorageError> for MuseError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound { entity, id } => MuseError::not_found(entity, id),
            StorageError::Io(e) => MuseError::Io(e),
            StorageError::Serialization(e) => MuseError::Serialization(e),
            StorageError::Database(e) => MuseError::Database(e.to_string()),
            other => MuseError::storage(other.to_string()),
        }
    }
}
