/// File storage service - manages uploaded avatar and banner images on disk
use crate::error::{Result, ServerError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;

/// URL prefix under which the upload directory is served
pub const UPLOADS_URL_PREFIX: &str = "/uploads";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaCategory {
    Avatar,
    Banner,
}

impl MediaCategory {
    pub const ALL: [MediaCategory; 2] = [MediaCategory::Avatar, MediaCategory::Banner];

    /// Multipart field that carries the file
    pub fn field_name(&self) -> &'static str {
        match self {
            MediaCategory::Avatar => "avatar",
            MediaCategory::Banner => "banner",
        }
    }

    pub fn subdirectory(&self) -> &'static str {
        match self {
            MediaCategory::Avatar => "avatars",
            MediaCategory::Banner => "banners",
        }
    }
}

#[derive(Debug, Clone)]
pub struct FileStorage {
    base_path: PathBuf,
}

impl FileStorage {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Initialize storage directories
    pub async fn initialize(&self) -> Result<()> {
        for category in MediaCategory::ALL {
            fs::create_dir_all(self.category_dir(category)).await?;
        }
        Ok(())
    }

    pub fn category_dir(&self, category: MediaCategory) -> PathBuf {
        self.base_path.join(category.subdirectory())
    }

    /// Public path clients use to fetch a stored file
    pub fn reference_path(category: MediaCategory, stored_name: &str) -> String {
        format!(
            "{}/{}/{}",
            UPLOADS_URL_PREFIX,
            category.subdirectory(),
            stored_name
        )
    }

    /// Store an uploaded file as `<unix-millis>-<original name>`
    ///
    /// Two uploads with the same name in the same millisecond overwrite each
    /// other. Returns the reference path.
    pub async fn store_upload(
        &self,
        category: MediaCategory,
        original_name: &str,
        data: &[u8],
    ) -> Result<String> {
        let stored_name = format!(
            "{}-{}",
            chrono::Utc::now().timestamp_millis(),
            sanitize_file_name(original_name)
        );
        let path = self.category_dir(category).join(&stored_name);

        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }

        fs::write(&path, data).await?;
        tracing::info!(
            "Stored {} upload at {:?} ({} bytes)",
            category.field_name(),
            path,
            data.len()
        );

        Ok(Self::reference_path(category, &stored_name))
    }

    /// Reference paths of every file in a category directory, sorted by name
    ///
    /// A missing or unreadable directory is an error, not an empty list.
    pub async fn list_files(&self, category: MediaCategory) -> Result<Vec<String>> {
        let dir = self.category_dir(category);
        let mut entries = fs::read_dir(&dir)
            .await
            .map_err(|e| ServerError::Storage(format!("Unable to read {:?}: {}", dir, e)))?;

        let mut names = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| ServerError::Storage(format!("Unable to read {:?}: {}", dir, e)))?
        {
            if entry.file_type().await?.is_file() {
                names.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        names.sort();

        Ok(names
            .iter()
            .map(|name| Self::reference_path(category, name))
            .collect())
    }
}

/// Keep only the final path component of a client-supplied file name
fn sanitize_file_name(original_name: &str) -> String {
    let normalized = original_name.replace('\\', "/");
    Path::new(&normalized)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| "upload".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_file_name() {
        assert_eq!(sanitize_file_name("me.png"), "me.png");
        assert_eq!(sanitize_file_name("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_file_name("C:\\Users\\me\\pic.jpg"), "pic.jpg");
        assert_eq!(sanitize_file_name(".."), "upload");
        assert_eq!(sanitize_file_name(""), "upload");
    }

    #[tokio::test]
    async fn test_store_and_list() {
        let temp_dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(temp_dir.path().to_path_buf());
        storage.initialize().await.unwrap();

        let reference = storage
            .store_upload(MediaCategory::Avatar, "me.png", b"fake image data")
            .await
            .unwrap();

        assert!(reference.starts_with("/uploads/avatars/"));
        assert!(reference.ends_with("-me.png"));

        let listed = storage.list_files(MediaCategory::Avatar).await.unwrap();
        assert_eq!(listed, vec![reference]);
        assert!(storage.list_files(MediaCategory::Banner).await.unwrap().is_empty());
    }
}
