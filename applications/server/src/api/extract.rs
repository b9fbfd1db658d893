/// Request body extractor with JSON error responses
use crate::error::ServerError;
use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
    http::StatusCode,
    Json,
};
use serde::de::DeserializeOwned;

/// `Json<T>` whose rejections become `ServerError::BadRequest`
///
/// Malformed JSON, a wrong content type, missing required fields and (for
/// types marked `deny_unknown_fields`) unknown fields all produce a 400 with
/// the usual `{"error": ...}` body instead of axum's plain-text rejection.
#[derive(Debug, Clone)]
pub struct ValidJson<T>(pub T);

#[axum::async_trait]
impl<T, S> FromRequest<S> for ValidJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ServerError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => {
                tracing::debug!("Rejected request body: {}", rejection.body_text());
                Err(ServerError::BadRequest(rejection.body_text()))
            }
        }
    }
}

/// Raw request body whose rejections become `ServerError::BadRequest`
///
/// A body over the route's `DefaultBodyLimit` is reported as "File too large".
#[derive(Debug, Clone)]
pub struct RawBody(pub Bytes);

#[axum::async_trait]
impl<S> FromRequest<S> for RawBody
where
    S: Send + Sync,
{
    type Rejection = ServerError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Bytes::from_request(req, state).await {
            Ok(bytes) => Ok(Self(bytes)),
            Err(rejection) if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE => {
                tracing::debug!("Rejected oversized body: {}", rejection.body_text());
                Err(ServerError::BadRequest("File too large".to_string()))
            }
            Err(rejection) => Err(ServerError::BadRequest(rejection.body_text())),
        }
    }
}
