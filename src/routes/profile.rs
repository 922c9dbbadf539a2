/**
 * Profile Routes
 * Public read and admin upsert for the singleton site-owner profile
 */
use axum::{extract::State, http::HeaderMap, Json};

use crate::routes::{require_auth, ApiError, AppJson};
use crate::store::models::{Profile, ProfilePatch};
use crate::AppState;

/// GET /api/profile
/// Returns the profile, or null when none has been created yet
pub async fn get_profile(State(state): State<AppState>) -> Json<Option<Profile>> {
    Json(state.store.get_profile().await)
}

/// PUT /api/admin/profile
/// Merge the partial body over the stored profile, creating it if absent
pub async fn update_profile(
    State(state): State<AppState>,
    headers: HeaderMap,
    AppJson(payload): AppJson<ProfilePatch>,
) -> Result<Json<Profile>, ApiError> {
    require_auth(&headers)?;
    let profile = state.store.upsert_profile(payload).await;
    Ok(Json(profile))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::auth::create_access_token;
    use crate::store::models::NewUser;
    use crate::store::MemStore;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum::routing::{get, put};
    use axum::Router;
    use std::sync::Arc;
    use tower::ServiceExt;

    async fn app_with_token() -> (Router, String) {
        let store = Arc::new(MemStore::new());
        let admin = store
            .create_user(NewUser {
                username: "admin".to_string(),
                password: "admin123".to_string(),
            })
            .await;
        let token = create_access_token(&admin).unwrap();
        let app = Router::new()
            .route("/api/profile", get(get_profile))
            .route("/api/admin/profile", put(update_profile))
            .with_state(AppState { store });
        (app, token)
    }

    #[tokio::test]
    async fn test_get_profile_returns_null_when_absent() {
        let (app, _) = app_with_token().await;
        let res = app
            .oneshot(Request::get("/api/profile").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&bytes[..], b"null");
    }

    #[tokio::test]
    async fn test_update_requires_auth() {
        let (app, _) = app_with_token().await;
        let req = Request::put("/api/admin/profile")
            .header("content-type", "application/json")
            .body(Body::from(r#"{"name":"Jane"}"#))
            .unwrap();
        let res = app.oneshot(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_upsert_then_read_back() {
        let (app, token) = app_with_token().await;

        let req = Request::put("/api/admin/profile")
            .header("content-type", "application/json")
            .header("authorization", format!("Bearer {}", token))
            .body(Body::from(
                r#"{"name":"Jane Developer","email":"jane@example.com"}"#,
            ))
            .unwrap();
        let res = app.clone().oneshot(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);

        let res = app
            .oneshot(Request::get("/api/profile").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
            .await
            .unwrap();
        let profile: Profile = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(profile.name, "Jane Developer");
        assert_eq!(profile.email, "jane@example.com");
    }
}
