/// Static catalog API routes
use crate::{
    error::Result,
    services::CatalogCategory,
    state::AppState,
};
use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
};

fn dataset(app_state: &AppState, category: CatalogCategory) -> Response {
    (
        [(header::CONTENT_TYPE, "application/json")],
        app_state.catalog.get(category),
    )
        .into_response()
}

/// GET /api/artists
pub async fn artists(State(app_state): State<AppState>) -> Response {
    dataset(&app_state, CatalogCategory::Artists)
}

/// GET /api/genres
pub async fn genres(State(app_state): State<AppState>) -> Response {
    dataset(&app_state, CatalogCategory::Genres)
}

/// GET /api/trending
pub async fn trending(State(app_state): State<AppState>) -> Response {
    dataset(&app_state, CatalogCategory::Trending)
}

/// GET /api/catalog/:category
/// Any dataset by name, including the featured `profiles` set
pub async fn get_dataset(
    Path(category): Path<String>,
    State(app_state): State<AppState>,
) -> Result<Response> {
    let category: CatalogCategory = category.parse()?;
    Ok(dataset(&app_state, category))
}
