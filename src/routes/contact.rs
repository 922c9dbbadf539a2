/**
 * Contact Routes
 * Public contact form plus admin message management
 */
use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    Json,
};

use crate::routes::{bad_request, not_found, require_auth, ApiError, AppJson};
use crate::store::models::{ContactMessage, NewContactMessage};
use crate::AppState;

/// POST /api/contact
/// Accepts a message from the public contact form
pub async fn create_message(
    State(state): State<AppState>,
    AppJson(payload): AppJson<NewContactMessage>,
) -> Result<(StatusCode, Json<ContactMessage>), ApiError> {
    if payload.first_name.trim().is_empty()
        || payload.last_name.trim().is_empty()
        || payload.email.trim().is_empty()
        || payload.subject.trim().is_empty()
        || payload.message.trim().is_empty()
    {
        return Err(bad_request("Invalid contact message data"));
    }

    let message = state.store.create_contact_message(payload).await;
    tracing::info!("Contact message received from {}", message.email);
    Ok((StatusCode::CREATED, Json(message)))
}

/// GET /api/admin/contacts
/// All messages, newest first
pub async fn list_messages(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<ContactMessage>>, ApiError> {
    require_auth(&headers)?;
    Ok(Json(state.store.get_contact_messages().await))
}

/// PUT /api/admin/contacts/{id}/read
pub async fn mark_message_read(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    require_auth(&headers)?;

    if state.store.mark_contact_message_read(id).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found("Contact message not found"))
    }
}

/// DELETE /api/admin/contacts/{id}
pub async fn delete_message(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    require_auth(&headers)?;

    if state.store.delete_contact_message(id).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found("Contact message not found"))
    }
}
