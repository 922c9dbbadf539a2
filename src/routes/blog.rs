/**
 * Blog Routes
 * Public published views by slug, full admin CRUD by id
 */
use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    Json,
};
use regex::Regex;

use crate::routes::{bad_request, not_found, require_auth, ApiError, AppJson};
use crate::store::models::{BlogPost, BlogPostPatch, NewBlogPost};
use crate::AppState;

// ============================================================================
// Validation
// ============================================================================

lazy_static::lazy_static! {
    /// Valid slug pattern: lowercase letters, numbers, and hyphens
    static ref SLUG_REGEX: Regex = Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").unwrap();
}

fn is_valid_slug(slug: &str) -> bool {
    SLUG_REGEX.is_match(slug)
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /api/blog
/// Published posts only, most recently published first
pub async fn list_published_posts(State(state): State<AppState>) -> Json<Vec<BlogPost>> {
    Json(state.store.get_published_blog_posts().await)
}

/// GET /api/blog/{slug}
/// A single post by slug; drafts are indistinguishable from missing posts
pub async fn get_published_post(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<BlogPost>, ApiError> {
    match state.store.get_blog_post_by_slug(&slug).await {
        Some(post) if post.published => Ok(Json(post)),
        _ => Err(not_found("Blog post not found")),
    }
}

/// GET /api/admin/blog
/// Every post including drafts, newest first
pub async fn list_posts_admin(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<BlogPost>>, ApiError> {
    require_auth(&headers)?;
    Ok(Json(state.store.get_blog_posts().await))
}

/// POST /api/admin/blog
pub async fn create_post(
    State(state): State<AppState>,
    headers: HeaderMap,
    AppJson(payload): AppJson<NewBlogPost>,
) -> Result<(StatusCode, Json<BlogPost>), ApiError> {
    require_auth(&headers)?;

    if payload.title.trim().is_empty()
        || payload.excerpt.trim().is_empty()
        || payload.content.trim().is_empty()
    {
        return Err(bad_request("Invalid blog post data"));
    }
    if !is_valid_slug(&payload.slug) {
        return Err(bad_request(
            "Slug must contain only lowercase letters, numbers, and hyphens",
        ));
    }

    let post = state.store.create_blog_post(payload).await;
    Ok((StatusCode::CREATED, Json(post)))
}

/// PUT /api/admin/blog/{id}
pub async fn update_post(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    AppJson(payload): AppJson<BlogPostPatch>,
) -> Result<Json<BlogPost>, ApiError> {
    require_auth(&headers)?;

    if let Some(slug) = &payload.slug {
        if !is_valid_slug(slug) {
            return Err(bad_request(
                "Slug must contain only lowercase letters, numbers, and hyphens",
            ));
        }
    }

    match state.store.update_blog_post(id, payload).await {
        Some(post) => Ok(Json(post)),
        None => Err(not_found("Blog post not found")),
    }
}

/// DELETE /api/admin/blog/{id}
pub async fn delete_post(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    require_auth(&headers)?;

    if state.store.delete_blog_post(id).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found("Blog post not found"))
    }
}
