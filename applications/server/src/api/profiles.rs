/// Account and profile API routes
use crate::{api::extract::ValidJson, error::Result, state::AppState};
use axum::{
    extract::{Path, State},
    Json,
};
use muse_core::{ProfileUpdate, UserProfile};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SignupRequest {
    pub username: String,
    pub password: String,
    pub name: String,
    /// `YYYY-MM-DD`
    pub dob: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Every profile field is replaced; omitted ones are cleared
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateProfileRequest {
    pub username: String,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub banner: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
}

/// GET /api/profiles
pub async fn list_profiles(State(app_state): State<AppState>) -> Result<Json<Vec<UserProfile>>> {
    let users = app_state.users.list().await?;
    Ok(Json(users.into_iter().map(UserProfile::from).collect()))
}

/// GET /api/profiles/:username
pub async fn get_profile(
    Path(username): Path<String>,
    State(app_state): State<AppState>,
) -> Result<Json<UserProfile>> {
    let user = app_state.users.get(&username).await?;
    Ok(Json(user.into()))
}

/// POST /api/signup
pub async fn signup(
    State(app_state): State<AppState>,
    ValidJson(req): ValidJson<SignupRequest>,
) -> Result<Json<UserProfile>> {
    let user = app_state
        .auth_service
        .signup(&req.username, &req.password, &req.name, &req.dob)
        .await?;
    Ok(Json(user.into()))
}

/// POST /api/login
pub async fn login(
    State(app_state): State<AppState>,
    ValidJson(req): ValidJson<LoginRequest>,
) -> Result<Json<UserProfile>> {
    let user = app_state
        .auth_service
        .authenticate(&req.username, &req.password)
        .await?;
    tracing::info!("User {} logged in", user.username);
    Ok(Json(user.into()))
}

/// PUT /api/profile/update
pub async fn update_profile(
    State(app_state): State<AppState>,
    ValidJson(req): ValidJson<UpdateProfileRequest>,
) -> Result<Json<UserProfile>> {
    let update = ProfileUpdate {
        avatar: req.avatar,
        banner: req.banner,
        bio: req.bio,
        location: req.location,
    };
    let user = app_state.users.update_profile(&req.username, update).await?;
    Ok(Json(user.into()))
}
