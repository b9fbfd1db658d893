//! Common test utilities and fixtures
#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use muse_server::{app, config::MIN_BCRYPT_COST, AppState, ServerConfig};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tower::util::ServiceExt;

pub const ARTISTS_JSON: &str = r#"[{"id": 1, "name": "Nova Lights", "genre": "synthpop"}]"#;
pub const GENRES_JSON: &str = r#"["pop", "jazz", "lo-fi"]"#;
pub const TRENDING_JSON: &str = r#"[{"rank": 1, "title": "Midnight Drive"}]"#;
pub const PROFILES_JSON: &str = r#"[{"username": "featured", "name": "Featured DJ"}]"#;

/// A running app wired to stores in a temp directory
pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub config: ServerConfig,
    pub temp_dir: TempDir,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_upload_limit(ServerConfig::default().uploads.max_body_bytes).await
    }

    /// App whose upload routes reject bodies over `max_body_bytes`
    pub async fn with_upload_limit(max_body_bytes: usize) -> Self {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();

        let catalog_dir = root.join("catalog");
        std::fs::create_dir_all(&catalog_dir).unwrap();
        std::fs::write(catalog_dir.join("artists.json"), ARTISTS_JSON).unwrap();
        std::fs::write(catalog_dir.join("genres.json"), GENRES_JSON).unwrap();
        std::fs::write(catalog_dir.join("trending.json"), TRENDING_JSON).unwrap();
        std::fs::write(catalog_dir.join("profiles.json"), PROFILES_JSON).unwrap();

        let public_dir = root.join("public");
        std::fs::create_dir_all(&public_dir).unwrap();
        std::fs::write(public_dir.join("index.html"), "<h1>Muse</h1>").unwrap();

        let mut config = ServerConfig::default();
        config.catalog.data_dir = catalog_dir;
        config.server.public_dir = public_dir;
        config.storage.database_url = format!("sqlite://{}", root.join("muse.db").display());
        config.storage.users_file = root.join("data").join("users.json");
        config.uploads.upload_dir = root.join("uploads");
        config.uploads.max_body_bytes = max_body_bytes;
        config.auth.bcrypt_cost = MIN_BCRYPT_COST;

        let state = app::build_state(&config).await.unwrap();
        let router = app::create_router(
            state.clone(),
            &config.server.public_dir,
            config.uploads.max_body_bytes,
        );

        Self {
            router,
            state,
            config,
            temp_dir,
        }
    }

    pub fn upload_dir(&self) -> &Path {
        &self.config.uploads.upload_dir
    }

    pub fn users_file(&self) -> PathBuf {
        self.config.storage.users_file.clone()
    }

    /// Send a request and return status plus raw body
    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Vec<u8>) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, body.to_vec())
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        let (status, body) = self.send(request).await;
        (status, parse_json(&body))
    }

    pub async fn json(&self, method: Method, uri: &str, body: Value) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let (status, body) = self.send(request).await;
        (status, parse_json(&body))
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(Method::DELETE)
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        let (status, body) = self.send(request).await;
        (status, parse_json(&body))
    }

    /// Create an account through the API
    pub async fn signup(&self, username: &str, password: &str) -> (StatusCode, Value) {
        self.json(
            Method::POST,
            "/api/signup",
            serde_json::json!({
                "username": username,
                "password": password,
                "name": format!("{} Example", username),
                "dob": "1995-06-15",
            }),
        )
        .await
    }

    pub async fn upload(
        &self,
        uri: &str,
        field: &str,
        filename: &str,
        data: &[u8],
    ) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={}", BOUNDARY),
            )
            .body(Body::from(multipart_body(field, Some(filename), data)))
            .unwrap();
        let (status, body) = self.send(request).await;
        (status, parse_json(&body))
    }
}

pub const BOUNDARY: &str = "muse-test-boundary";

/// Single-part multipart body; `filename: None` makes it a plain text field
pub fn multipart_body(field: &str, filename: Option<&str>, data: &[u8]) -> Vec<u8> {
    let disposition = match filename {
        Some(filename) => format!(
            "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n\
             Content-Type: application/octet-stream",
            field, filename
        ),
        None => format!("Content-Disposition: form-data; name=\"{}\"", field),
    };

    let mut body = Vec::new();
    body.extend_from_slice(format!("--{}\r\n{}\r\n\r\n", BOUNDARY, disposition).as_bytes());
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{}--\r\n", BOUNDARY).as_bytes());
    body
}

pub fn parse_json(body: &[u8]) -> Value {
    if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(body)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(body).into_owned()))
    }
}
