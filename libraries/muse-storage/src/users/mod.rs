//! User accounts stored in a flat JSON file
//!
//! The file holds a JSON array of user records. Every mutation reads the whole
//! array, changes it in memory and writes the whole array back. The write goes
//! to a sibling `.tmp` file that is then renamed over the original, so a
//! reader always sees either the old or the new collection.

use crate::error::{Result, StorageError};
use async_trait::async_trait;
use muse_core::{MuseError, NewUser, ProfileUpdate, User, UserStore};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tokio::{fs, io::AsyncWriteExt, sync::Mutex};

/// File-backed user store
///
/// Read-modify-write cycles hold `write_lock` from the read to the rename,
/// so concurrent signups and profile updates cannot drop each other's
/// changes.
#[derive(Debug)]
pub struct JsonUserStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonUserStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the parent directory and an empty collection if the file is missing
    pub async fn initialize(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }

        let _guard = self.write_lock.lock().await;
        if fs::try_exists(&self.path).await? {
            // Fail early on a corrupt file rather than on the first request
            let users = self.load().await?;
            tracing::info!("Loaded {} users from {:?}", users.len(), self.path);
        } else {
            self.save(&[]).await?;
            tracing::info!("Created empty user file at {:?}", self.path);
        }
        Ok(())
    }

    /// Read the full collection; a missing file is an empty collection
    async fn load(&self) -> Result<Vec<User>> {
        let bytes = match fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Vec::new());
        }

        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Rewrite the full collection
    async fn save(&self, users: &[User]) -> Result<()> {
        let json = serde_json::to_vec_pretty(users)?;

        let mut tmp_name = OsString::from(self.path.as_os_str());
        tmp_name.push(".tmp");
        let tmp_path = PathBuf::from(tmp_name);

        let mut tmp_file = fs::File::create(&tmp_path).await?;
        tmp_file.write_all(&json).await?;
        tmp_file.sync_all().await?;
        drop(tmp_file);

        fs::rename(&tmp_path, &self.path).await?;
        Ok(())
    }

    async fn insert(&self, new_user: NewUser) -> std::result::Result<User, MuseError> {
        let _guard = self.write_lock.lock().await;

        let mut users = self.load().await?;
        if users.iter().any(|u| u.username == new_user.username) {
            return Err(MuseError::duplicate(format!(
                "Username '{}' is already taken",
                new_user.username
            )));
        }

        let user = User::new(new_user);
        users.push(user.clone());
        self.save(&users).await?;

        tracing::debug!("Stored user {}", user.username);
        Ok(user)
    }

    async fn replace_profile(&self, username: &str, update: ProfileUpdate) -> Result<User> {
        let _guard = self.write_lock.lock().await;

        let mut users = self.load().await?;
        let user = users
            .iter_mut()
            .find(|u| u.username == username)
            .ok_or_else(|| StorageError::not_found("User", username))?;

        user.apply_profile(update);
        let updated = user.clone();
        self.save(&users).await?;

        Ok(updated)
    }
}

#[async_trait]
impl UserStore for JsonUserStore {
    async fn list(&self) -> muse_core::Result<Vec<User>> {
        Ok(self.load().await?)
    }

    async fn find(&self, username: &str) -> muse_core::Result<Option<User>> {
        let users = self.load().await?;
        Ok(users.into_iter().find(|u| u.username == username))
    }

    async fn create(&self, user: NewUser) -> muse_core::Result<User> {
        self.insert(user).await
    }

    async fn update_profile(
        &self,
        username: &str,
        update: ProfileUpdate,
    ) -> muse_core::Result<User> {
        Ok(self.replace_profile(username, update).await?)
    }
}
