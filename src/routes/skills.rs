/**
 * Skill Routes
 * Public listing plus admin CRUD for skills
 */
use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    Json,
};

use crate::routes::{bad_request, not_found, require_auth, ApiError, AppJson};
use crate::store::models::{NewSkill, Skill, SkillPatch};
use crate::AppState;

/// GET /api/skills
/// Skills ordered by displayOrder ascending
pub async fn list_skills(State(state): State<AppState>) -> Json<Vec<Skill>> {
    Json(state.store.get_skills().await)
}

/// POST /api/admin/skills
pub async fn create_skill(
    State(state): State<AppState>,
    headers: HeaderMap,
    AppJson(payload): AppJson<NewSkill>,
) -> Result<(StatusCode, Json<Skill>), ApiError> {
    require_auth(&headers)?;

    if payload.name.trim().is_empty() || payload.category.trim().is_empty() {
        return Err(bad_request("Invalid skill data"));
    }

    let skill = state.store.create_skill(payload).await;
    Ok((StatusCode::CREATED, Json(skill)))
}

/// PUT /api/admin/skills/{id}
pub async fn update_skill(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    AppJson(payload): AppJson<SkillPatch>,
) -> Result<Json<Skill>, ApiError> {
    require_auth(&headers)?;

    match state.store.update_skill(id, payload).await {
        Some(skill) => Ok(Json(skill)),
        None => Err(not_found("Skill not found")),
    }
}

/// DELETE /api/admin/skills/{id}
pub async fn delete_skill(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    require_auth(&headers)?;

    if state.store.delete_skill(id).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found("Skill not found"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::auth::create_access_token;
    use crate::store::models::NewUser;
    use crate::store::MemStore;
    use axum::body::Body;
    use axum::http::Request;
    use axum::routing::{get, post, put};
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
            .route("/api/skills", get(list_skills))
            .route("/api/admin/skills", post(create_skill))
            .route(
                "/api/admin/skills/{id}",
                put(update_skill).delete(delete_skill),
            )
            .with_state(AppState { store });
        (app, token)
    }

    async fn send(app: Router, req: Request<Body>) -> (StatusCode, axum::body::Bytes) {
        let res = app.oneshot(req).await.unwrap();
        let status = res.status();
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, bytes)
    }

    fn create_req(token: &str, body: &str) -> Request<Body> {
        Request::post("/api/admin/skills")
            .header("content-type", "application/json")
            .header("authorization", format!("Bearer {}", token))
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_listing_is_ordered_by_display_order() {
        let (app, token) = app_with_token().await;

        let (status, _) = send(
            app.clone(),
            create_req(
                &token,
                r#"{"name":"React","category":"frontend","proficiency":9,"displayOrder":0}"#,
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, _) = send(
            app.clone(),
            create_req(
                &token,
                r#"{"name":"Node.js","category":"backend","proficiency":8,"displayOrder":1}"#,
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, bytes) = send(
            app,
            Request::get("/api/skills").body(Body::empty()).unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let skills: Vec<Skill> = serde_json::from_slice(&bytes).unwrap();
        let names: Vec<&str> = skills.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["React", "Node.js"]);
    }

    #[tokio::test]
    async fn test_create_without_token_is_rejected() {
        let (app, _) = app_with_token().await;
        let req = Request::post("/api/admin/skills")
            .header("content-type", "application/json")
            .body(Body::from(
                r#"{"name":"React","category":"frontend","proficiency":9}"#,
            ))
            .unwrap();
        let (status, _) = send(app, req).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_create_with_empty_name_is_rejected() {
        let (app, token) = app_with_token().await;
        let (status, _) = send(
            app.clone(),
            create_req(&token, r#"{"name":"","category":"frontend","proficiency":9}"#),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (_, bytes) = send(
            app,
            Request::get("/api/skills").body(Body::empty()).unwrap(),
        )
        .await;
        let skills: Vec<Skill> = serde_json::from_slice(&bytes).unwrap();
        assert!(skills.is_empty(), "rejected create must not insert");
    }

    #[tokio::test]
    async fn test_create_missing_required_field_is_bad_request() {
        let (app, token) = app_with_token().await;
        // proficiency missing entirely
        let (status, _) = send(
            app,
            create_req(&token, r#"{"name":"React","category":"frontend"}"#),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_update_and_delete_lifecycle() {
        let (app, token) = app_with_token().await;
        let (_, bytes) = send(
            app.clone(),
            create_req(
                &token,
                r#"{"name":"React","category":"frontend","proficiency":9}"#,
            ),
        )
        .await;
        let skill: Skill = serde_json::from_slice(&bytes).unwrap();

        let req = Request::put(format!("/api/admin/skills/{}", skill.id))
            .header("content-type", "application/json")
            .header("authorization", format!("Bearer {}", token))
            .body(Body::from(r#"{"proficiency":10}"#))
            .unwrap();
        let (status, bytes) = send(app.clone(), req).await;
        assert_eq!(status, StatusCode::OK);
        let updated: Skill = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(updated.proficiency, 10);
        assert_eq!(updated.name, "React");

        let del = |app: Router, token: String, id: i64| async move {
            let req = Request::delete(format!("/api/admin/skills/{}", id))
                .header("authorization", format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap();
            send(app, req).await.0
        };
        assert_eq!(
            del(app.clone(), token.clone(), skill.id).await,
            StatusCode::NO_CONTENT
        );
        assert_eq!(
            del(app, token, skill.id).await,
            StatusCode::NOT_FOUND,
            "second delete reports not found"
        );
    }

    #[tokio::test]
    async fn test_update_unknown_id_is_not_found() {
        let (app, token) = app_with_token().await;
        let req = Request::put("/api/admin/skills/999")
            .header("content-type", "application/json")
            .header("authorization", format!("Bearer {}", token))
            .body(Body::from(r#"{"proficiency":10}"#))
            .unwrap();
        let (status, _) = send(app, req).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
