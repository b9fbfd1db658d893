/// Application assembly: state construction and the full router
use crate::{
    api,
    config::ServerConfig,
    error::Result,
    services::{file_storage::UPLOADS_URL_PREFIX, AuthService, Catalog, FileStorage},
    state::AppState,
};
use axum::Router;
use muse_core::{SongStore, UserStore};
use muse_storage::{JsonUserStore, SqliteSongStore};
use std::{path::Path, sync::Arc};
use tower_http::{
    cors::CorsLayer,
    services::ServeDir,
    trace::{DefaultMakeSpan, TraceLayer},
};

/// Open every store and load the catalog described by `config`
pub async fn build_state(config: &ServerConfig) -> Result<AppState> {
    let catalog = Arc::new(Catalog::load(&config.catalog.data_dir).await?);
    tracing::info!("Catalog loaded from {:?}", config.catalog.data_dir);

    let pool = muse_storage::create_pool(&config.storage.database_url).await?;
    muse_storage::run_migrations(&pool).await?;
    let songs: Arc<dyn SongStore> = Arc::new(SqliteSongStore::new(pool));
    tracing::info!("Database connected");

    let user_store = JsonUserStore::new(config.storage.users_file.clone());
    user_store.initialize().await?;
    tracing::info!("User store ready at {:?}", user_store.path());
    let users: Arc<dyn UserStore> = Arc::new(user_store);

    let file_storage = FileStorage::new(config.uploads.upload_dir.clone());
    file_storage.initialize().await?;
    let file_storage = Arc::new(file_storage);
    tracing::info!("File storage initialized");

    let auth_service = Arc::new(AuthService::new(
        Arc::clone(&users),
        config.auth.bcrypt_cost,
    ));

    Ok(AppState::new(
        catalog,
        users,
        songs,
        auth_service,
        file_storage,
    ))
}

/// Full router: `/api`, uploaded files and the web UI
pub fn create_router(app_state: AppState, public_dir: &Path, max_upload_bytes: usize) -> Router {
    let uploads_dir = app_state.file_storage.base_path().to_path_buf();

    Router::new()
        .nest("/api", api::router(max_upload_bytes))
        .nest_service(UPLOADS_URL_PREFIX, ServeDir::new(uploads_dir))
        // index.html at / and any other static asset
        .fallback_service(ServeDir::new(public_dir))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::default().include_headers(true)),
        )
        .layer(CorsLayer::permissive())
        .with_state(app_state)
}
