/// API route modules
pub mod catalog;
pub mod extract;
pub mod health;
pub mod playlist;
pub mod profiles;
pub mod uploads;

use crate::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post, put},
    Router,
};

/// Routes mounted under `/api`
///
/// `max_upload_bytes` caps the request body of the two upload routes only.
pub fn router(max_upload_bytes: usize) -> Router<AppState> {
    let uploads = Router::new()
        .route("/upload/avatar", post(uploads::upload_avatar))
        .route("/upload/banner", post(uploads::upload_banner))
        .layer(DefaultBodyLimit::max(max_upload_bytes));

    Router::new()
        .route("/health", get(health::health))
        // Static catalog
        .route("/artists", get(catalog::artists))
        .route("/genres", get(catalog::genres))
        .route("/trending", get(catalog::trending))
        .route("/catalog/:category", get(catalog::get_dataset))
        // Accounts
        .route("/profiles", get(profiles::list_profiles))
        .route("/profiles/:username", get(profiles::get_profile))
        .route("/signup", post(profiles::signup))
        .route("/login", post(profiles::login))
        .route("/profile/update", put(profiles::update_profile))
        // Media
        .route("/avatars", get(uploads::list_avatars))
        .route("/banners", get(uploads::list_banners))
        // Playlist
        .route(
            "/playlist",
            get(playlist::list_songs).post(playlist::add_song),
        )
        .route(
            "/playlist/:id",
            put(playlist::update_song).delete(playlist::delete_song),
        )
        .merge(uploads)
}
