/**
 * Experience Routes
 * Public listing plus admin CRUD for work experience entries
 */
use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    Json,
};

use crate::routes::{bad_request, not_found, require_auth, ApiError, AppJson};
use crate::store::models::{Experience, ExperiencePatch, NewExperience};
use crate::AppState;

/// GET /api/experiences
/// Experiences ordered by displayOrder ascending
pub async fn list_experiences(State(state): State<AppState>) -> Json<Vec<Experience>> {
    Json(state.store.get_experiences().await)
}

/// POST /api/admin/experiences
pub async fn create_experience(
    State(state): State<AppState>,
    headers: HeaderMap,
    AppJson(payload): AppJson<NewExperience>,
) -> Result<(StatusCode, Json<Experience>), ApiError> {
    require_auth(&headers)?;

    if payload.company.trim().is_empty()
        || payload.role.trim().is_empty()
        || payload.duration.trim().is_empty()
        || payload.description.trim().is_empty()
    {
        return Err(bad_request("Invalid experience data"));
    }

    let experience = state.store.create_experience(payload).await;
    Ok((StatusCode::CREATED, Json(experience)))
}

/// PUT /api/admin/experiences/{id}
pub async fn update_experience(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    AppJson(payload): AppJson<ExperiencePatch>,
) -> Result<Json<Experience>, ApiError> {
    require_auth(&headers)?;

    match state.store.update_experience(id, payload).await {
        Some(experience) => Ok(Json(experience)),
        None => Err(not_found("Experience not found")),
    }
}

/// DELETE /api/admin/experiences/{id}
pub async fn delete_experience(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    require_auth(&headers)?;

    if state.store.delete_experience(id).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found("Experience not found"))
    }
}
