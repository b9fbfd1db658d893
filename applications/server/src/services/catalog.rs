/// Static catalog datasets, loaded once at startup and served verbatim
use crate::error::{Result, ServerError};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::{collections::HashMap, fmt, path::Path, str::FromStr};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CatalogCategory {
    Artists,
    Genres,
    Trending,
    Profiles,
}

impl CatalogCategory {
    pub const ALL: [CatalogCategory; 4] = [
        CatalogCategory::Artists,
        CatalogCategory::Genres,
        CatalogCategory::Trending,
        CatalogCategory::Profiles,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CatalogCategory::Artists => "artists",
            CatalogCategory::Genres => "genres",
            CatalogCategory::Trending => "trending",
            CatalogCategory::Profiles => "profiles",
        }
    }

    pub fn file_name(&self) -> String {
        format!("{}.json", self.as_str())
    }
}

impl fmt::Display for CatalogCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CatalogCategory {
    type Err = ServerError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| ServerError::NotFound(format!("Unknown catalog category: {}", s)))
    }
}

/// Immutable reference data shared by all handlers
#[derive(Debug, Clone)]
pub struct Catalog {
    datasets: HashMap<CatalogCategory, Bytes>,
}

impl Catalog {
    /// Load every dataset from `<dir>/<category>.json`
    ///
    /// Each file must exist and hold valid JSON. The original bytes are kept
    /// so responses match the files exactly.
    pub async fn load(dir: &Path) -> Result<Self> {
        let mut datasets = HashMap::new();

        for category in CatalogCategory::ALL {
            let path = dir.join(category.file_name());
            let bytes = tokio::fs::read(&path).await.map_err(|e| {
                ServerError::Config(format!("Failed to read catalog file {:?}: {}", path, e))
            })?;

            serde_json::from_slice::<serde::de::IgnoredAny>(&bytes).map_err(|e| {
                ServerError::Config(format!("Catalog file {:?} is not valid JSON: {}", path, e))
            })?;

            tracing::debug!("Loaded {} catalog ({} bytes)", category, bytes.len());
            datasets.insert(category, Bytes::from(bytes));
        }

        Ok(Self { datasets })
    }

    /// Raw JSON for a category
    pub fn get(&self, category: CatalogCategory) -> Bytes {
        self.datasets.get(&category).cloned().unwrap_or_default()
    }
}
