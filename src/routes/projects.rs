/**
 * Project Routes
 * Public listing (with featured filter) and detail, plus admin CRUD
 */
use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    Json,
};
use serde::Deserialize;

use crate::routes::{bad_request, not_found, require_auth, ApiError, AppJson};
use crate::store::models::{NewProject, Project, ProjectPatch};
use crate::AppState;

/// Query parameters for GET /api/projects
#[derive(Debug, Deserialize)]
pub struct ProjectsQuery {
    pub featured: Option<bool>,
}

/// GET /api/projects?featured=true
/// Projects ordered by displayOrder ascending; `featured=true` narrows the
/// list to the featured subset in the same relative order
pub async fn list_projects(
    State(state): State<AppState>,
    Query(query): Query<ProjectsQuery>,
) -> Json<Vec<Project>> {
    let projects = if query.featured == Some(true) {
        state.store.get_featured_projects().await
    } else {
        state.store.get_projects().await
    };
    Json(projects)
}

/// GET /api/projects/{id}
pub async fn get_project(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Project>, ApiError> {
    match state.store.get_project(id).await {
        Some(project) => Ok(Json(project)),
        None => Err(not_found("Project not found")),
    }
}

/// GET /api/admin/projects
/// Full unfiltered list for the dashboard
pub async fn list_projects_admin(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<Project>>, ApiError> {
    require_auth(&headers)?;
    Ok(Json(state.store.get_projects().await))
}

/// POST /api/admin/projects
pub async fn create_project(
    State(state): State<AppState>,
    headers: HeaderMap,
    AppJson(payload): AppJson<NewProject>,
) -> Result<(StatusCode, Json<Project>), ApiError> {
    require_auth(&headers)?;

    if payload.title.trim().is_empty() || payload.description.trim().is_empty() {
        return Err(bad_request("Invalid project data"));
    }

    let project = state.store.create_project(payload).await;
    Ok((StatusCode::CREATED, Json(project)))
}

/// PUT /api/admin/projects/{id}
pub async fn update_project(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    AppJson(payload): AppJson<ProjectPatch>,
) -> Result<Json<Project>, ApiError> {
    require_auth(&headers)?;

    match state.store.update_project(id, payload).await {
        Some(project) => Ok(Json(project)),
        None => Err(not_found("Project not found")),
    }
}

/// DELETE /api/admin/projects/{id}
pub async fn delete_project(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    require_auth(&headers)?;

    if state.store.delete_project(id).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found("Project not found"))
    }
}
