/// Upload and media listing API routes
use crate::{
    api::extract::RawBody,
    error::{Result, ServerError},
    services::MediaCategory,
    state::AppState,
};
use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap},
    Json,
};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub path: String,
}

/// The file part of a multipart upload
struct UploadedFile {
    original_name: String,
    data: Bytes,
}

/// Pull the file part named `field_name` out of a multipart body
///
/// Parts with other names, and parts without a file name, are skipped.
async fn read_file_field(
    headers: &HeaderMap,
    body: Bytes,
    field_name: &str,
) -> Result<Option<UploadedFile>> {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| ServerError::BadRequest("Missing Content-Type".to_string()))?;

    if !content_type.starts_with("multipart/form-data") {
        return Err(ServerError::BadRequest(
            "Expected multipart/form-data".to_string(),
        ));
    }

    let boundary = multer::parse_boundary(content_type)
        .map_err(|e| ServerError::BadRequest(format!("Missing boundary: {}", e)))?;

    // Convert Bytes to a stream for multer
    let stream = futures_util::stream::once(async move { Ok::<_, std::io::Error>(body) });
    let mut multipart = multer::Multipart::new(stream, boundary);

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ServerError::BadRequest(format!("Failed to parse multipart: {}", e)))?
    {
        if field.name() != Some(field_name) {
            continue;
        }
        let Some(original_name) = field.file_name().map(str::to_string) else {
            continue;
        };

        let data = field
            .bytes()
            .await
            .map_err(|e| ServerError::BadRequest(format!("Failed to read file: {}", e)))?;

        return Ok(Some(UploadedFile {
            original_name,
            data,
        }));
    }

    Ok(None)
}

async fn store(
    app_state: &AppState,
    category: MediaCategory,
    headers: &HeaderMap,
    body: Bytes,
) -> Result<Json<UploadResponse>> {
    let file = read_file_field(headers, body, category.field_name())
        .await?
        .ok_or_else(|| ServerError::BadRequest("No file uploaded".to_string()))?;

    let path = app_state
        .file_storage
        .store_upload(category, &file.original_name, &file.data)
        .await?;

    Ok(Json(UploadResponse { path }))
}

/// POST /api/upload/avatar
/// Multipart body with the image in the `avatar` field
pub async fn upload_avatar(
    State(app_state): State<AppState>,
    headers: HeaderMap,
    RawBody(body): RawBody,
) -> Result<Json<UploadResponse>> {
    store(&app_state, MediaCategory::Avatar, &headers, body).await
}

/// POST /api/upload/banner
/// Multipart body with the image in the `banner` field
pub async fn upload_banner(
    State(app_state): State<AppState>,
    headers: HeaderMap,
    RawBody(body): RawBody,
) -> Result<Json<UploadResponse>> {
    store(&app_state, MediaCategory::Banner, &headers, body).await
}

/// GET /api/avatars
pub async fn list_avatars(State(app_state): State<AppState>) -> Result<Json<Vec<String>>> {
    let files = app_state
        .file_storage
        .list_files(MediaCategory::Avatar)
        .await?;
    Ok(Json(files))
}

/// GET /api/banners
pub async fn list_banners(State(app_state): State<AppState>) -> Result<Json<Vec<String>>> {
    let files = app_state
        .file_storage
        .list_files(MediaCategory::Banner)
        .await?;
    Ok(Json(files))
}
