/// Server configuration
use crate::error::{Result, ServerError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Cost bounds accepted by bcrypt
pub const MIN_BCRYPT_COST: u32 = 4;
pub const MAX_BCRYPT_COST: u32 = 31;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_server")]
    pub server: ServerSettings,

    #[serde(default = "default_storage")]
    pub storage: StorageSettings,

    #[serde(default = "default_catalog")]
    pub catalog: CatalogSettings,

    #[serde(default = "default_auth")]
    pub auth: AuthSettings,

    #[serde(default = "default_uploads")]
    pub uploads: UploadSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Web UI served for every non-API path
    #[serde(default = "default_public_dir")]
    pub public_dir: PathBuf,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageSettings {
    #[serde(default = "default_database_url")]
    pub database_url: String,

    #[serde(default = "default_users_file")]
    pub users_file: PathBuf,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CatalogSettings {
    /// Directory holding artists.json, genres.json, trending.json and profiles.json
    #[serde(default = "default_catalog_dir")]
    pub data_dir: PathBuf,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthSettings {
    #[serde(default = "default_bcrypt_cost")]
    pub bcrypt_cost: u32,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UploadSettings {
    #[serde(default = "default_upload_dir")]
    pub upload_dir: PathBuf,

    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

impl ServerConfig {
    /// Load configuration from file and environment
    ///
    /// Sources, later ones winning: `config.toml` (or `path`), `MUSE_*`
    /// variables with `__` between sections (e.g. `MUSE_SERVER__PORT`), and
    /// finally a bare `PORT`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                settings = settings.add_source(config::File::from(path.to_path_buf()));
            }
            None => {
                let config_path = PathBuf::from("config.toml");
                if config_path.exists() {
                    settings = settings.add_source(config::File::from(config_path));
                }
            }
        }

        settings = settings.add_source(
            config::Environment::with_prefix("MUSE")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = settings
            .build()
            .map_err(|e| ServerError::Config(e.to_string()))?;

        let mut config: ServerConfig = config
            .try_deserialize()
            .map_err(|e| ServerError::Config(e.to_string()))?;

        if let Ok(port) = std::env::var("PORT") {
            config.server.port = port
                .parse()
                .map_err(|_| ServerError::Config(format!("Invalid PORT value: {}", port)))?;
        }

        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(ServerError::Config("Port must not be 0".to_string()));
        }

        if !(MIN_BCRYPT_COST..=MAX_BCRYPT_COST).contains(&self.auth.bcrypt_cost) {
            return Err(ServerError::Config(format!(
                "bcrypt cost must be between {} and {}, got {}",
                MIN_BCRYPT_COST,
                MAX_BCRYPT_COST,
                self.auth.bcrypt_cost
            )));
        }

        if !self.catalog.data_dir.is_dir() {
            return Err(ServerError::Config(format!(
                "Catalog directory not found at {:?}",
                self.catalog.data_dir
            )));
        }

        Ok(())
    }
}

// Default values
fn default_server() -> ServerSettings {
    ServerSettings {
        host: default_host(),
        port: default_port(),
        public_dir: default_public_dir(),
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_public_dir() -> PathBuf {
    PathBuf::from("./public")
}

fn default_storage() -> StorageSettings {
    StorageSettings {
        database_url: default_database_url(),
        users_file: default_users_file(),
    }
}

fn default_database_url() -> String {
    "sqlite://./data/muse.db".to_string()
}

fn default_users_file() -> PathBuf {
    PathBuf::from("./data/users.json")
}

fn default_catalog() -> CatalogSettings {
    CatalogSettings {
        data_dir: default_catalog_dir(),
    }
}

fn default_catalog_dir() -> PathBuf {
    PathBuf::from("./data/catalog")
}

fn default_auth() -> AuthSettings {
    AuthSettings {
        bcrypt_cost: default_bcrypt_cost(),
    }
}

fn default_bcrypt_cost() -> u32 {
    bcrypt::DEFAULT_COST
}

fn default_uploads() -> UploadSettings {
    UploadSettings {
        upload_dir: default_upload_dir(),
        max_body_bytes: default_max_body_bytes(),
    }
}

fn default_upload_dir() -> PathBuf {
    PathBuf::from("./uploads")
}

fn default_max_body_bytes() -> usize {
    16 * 1024 * 1024
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            server: default_server(),
            storage: default_storage(),
            catalog: default_catalog(),
            auth: default_auth(),
            uploads: default_uploads(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Environment variables are process-wide; tests that call `load` hold this
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.auth.bcrypt_cost, bcrypt::DEFAULT_COST);
        assert_eq!(config.uploads.upload_dir, PathBuf::from("./uploads"));
    }

    #[test]
    fn validate_rejects_bad_bcrypt_cost() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = ServerConfig::default();
        config.catalog.data_dir = dir.path().to_path_buf();
        assert!(config.validate().is_ok());

        config.auth.bcrypt_cost = 2;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_missing_catalog_dir() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = ServerConfig::default();
        config.catalog.data_dir = dir.path().join("missing");
        assert!(matches!(config.validate(), Err(ServerError::Config(_))));
    }

    #[test]
    fn load_reads_toml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("muse.toml");
        std::fs::write(
            &path,
            r#"
            [storage]
            users_file = "/tmp/muse-users.json"

            [uploads]
            max_body_bytes = 1024
            "#,
        )
        .unwrap();

        let _env = ENV_LOCK.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        let config = ServerConfig::load(Some(path.as_path())).unwrap();
        assert_eq!(config.storage.users_file, PathBuf::from("/tmp/muse-users.json"));
        assert_eq!(config.uploads.max_body_bytes, 1024);
        // Untouched sections keep their defaults
        assert_eq!(config.catalog.data_dir, PathBuf::from("./data/catalog"));
    }

    #[test]
    fn load_applies_env_overrides_in_order() {
        let _env = ENV_LOCK.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("muse.toml");
        std::fs::write(&path, "[server]\nport = 4000\n").unwrap();

        std::env::remove_var("PORT");
        std::env::set_var("MUSE_SERVER__PORT", "5000");
        std::env::set_var("MUSE_AUTH__BCRYPT_COST", "6");
        let config = ServerConfig::load(Some(path.as_path()));

        std::env::set_var("PORT", "6000");
        let with_port = ServerConfig::load(Some(path.as_path()));

        std::env::set_var("PORT", "not-a-port");
        let invalid = ServerConfig::load(Some(path.as_path()));

        std::env::remove_var("PORT");
        std::env::remove_var("MUSE_SERVER__PORT");
        std::env::remove_var("MUSE_AUTH__BCRYPT_COST");
        let file_only = ServerConfig::load(Some(path.as_path()));

        let config = config.unwrap();
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.auth.bcrypt_cost, 6);
        assert_eq!(with_port.unwrap().server.port, 6000);
        assert!(matches!(invalid, Err(ServerError::Config(_))));
        assert_eq!(file_only.unwrap().server.port, 4000);
    }
}
