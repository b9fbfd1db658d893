/// Shared application state
use crate::services::{AuthService, Catalog, FileStorage};
use muse_core::{SongStore, UserStore};
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub users: Arc<dyn UserStore>,
    pub songs: Arc<dyn SongStore>,
    pub auth_service: Arc<AuthService>,
    pub file_storage: Arc<FileStorage>,
}

impl AppState {
    pub fn new(
        catalog: Arc<Catalog>,
        users: Arc<dyn UserStore>,
        songs: Arc<dyn SongStore>,
        auth_service: Arc<AuthService>,
        file_storage: Arc<FileStorage>,
    ) -> Self {
        Self {
            catalog,
            users,
            songs,
            auth_service,
            file_storage,
        }
    }
}
