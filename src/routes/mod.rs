/**
 * Routes Module
 * API route handlers plus the shared error shape and auth guard
 */
pub mod auth;
pub mod blog;
pub mod contact;
pub mod experiences;
pub mod health;
pub mod profile;
pub mod projects;
pub mod skills;

use axum::{
    extract::{rejection::JsonRejection, FromRequest, Request},
    http::{HeaderMap, StatusCode},
    Json,
};
use serde::Serialize;

use crate::routes::auth::{verify_access_token, Claims};

/// Error response body shared by every handler
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub message: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Rejection type used by all handlers that fail before reaching the store
pub type ApiError = (StatusCode, Json<ErrorResponse>);

pub fn bad_request(message: impl Into<String>) -> ApiError {
    (StatusCode::BAD_REQUEST, Json(ErrorResponse::new(message)))
}

pub fn not_found(message: impl Into<String>) -> ApiError {
    (StatusCode::NOT_FOUND, Json(ErrorResponse::new(message)))
}

/// JSON extractor that maps body rejections (malformed JSON, missing fields,
/// wrong types) to a 400 with the shared error shape instead of axum's
/// default plaintext 422.
pub struct AppJson<T>(pub T);

impl<S, T> FromRequest<S> for AppJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(AppJson(value)),
            Err(rejection) => Err(bad_request(rejection.body_text())),
        }
    }
}

/// Admin route guard. Extracts the bearer token from the Authorization
/// header and verifies it; a missing token and a bad token are reported
/// differently (401 vs 403) but neither reveals why verification failed.
pub fn require_auth(headers: &HeaderMap) -> Result<Claims, ApiError> {
    let token = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "));

    match token {
        Some(t) => verify_access_token(t).map_err(|_| {
            (
                StatusCode::FORBIDDEN,
                Json(ErrorResponse::new("Invalid or expired token")),
            )
        }),
        None => Err((
            StatusCode::UNAUTHORIZED,
            Json(ErrorResponse::new("Access token required")),
        )),
    }
}
