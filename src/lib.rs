//! Portfolio API - library for app logic and testing

pub mod logging;
pub mod routes;
pub mod store;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    http::{HeaderValue, Method},
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{
    compression::CompressionLayer, cors::CorsLayer, limit::RequestBodyLimitLayer, trace::TraceLayer,
};

use store::models::NewUser;
use store::MemStore;

/// Shared application state: the store is constructed once at startup and
/// handed to the router, never reached through a global.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<MemStore>,
}

/// Configure CORS from environment variables.
/// Uses ALLOWED_ORIGINS (comma-separated) or FRONTEND_ORIGIN.
/// Falls back to the local dev frontend origins.
pub fn configure_cors() -> CorsLayer {
    let allowed_origins = std::env::var("ALLOWED_ORIGINS")
        .ok()
        .and_then(|s| {
            let origins: Vec<HeaderValue> = s
                .split(',')
                .filter_map(|origin| origin.trim().parse().ok())
                .collect();
            if origins.is_empty() {
                None
            } else {
                Some(origins)
            }
        })
        .or_else(|| {
            std::env::var("FRONTEND_ORIGIN")
                .ok()
                .and_then(|s| s.parse().ok())
                .map(|origin| vec![origin])
        })
        .unwrap_or_else(|| {
            vec![
                "http://localhost:3000".parse().unwrap(),
                "http://127.0.0.1:3000".parse().unwrap(),
            ]
        });

    CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([
            axum::http::header::CONTENT_TYPE,
            axum::http::header::AUTHORIZATION,
        ])
        .allow_credentials(true)
}

/// Create and configure the application router.
pub fn create_app(state: AppState) -> Router {
    let cors = configure_cors();

    Router::new()
        // auth
        .route("/api/auth/login", post(routes::auth::login))
        .route("/api/auth/verify", post(routes::auth::verify_token))
        // public content
        .route("/api/profile", get(routes::profile::get_profile))
        .route("/api/skills", get(routes::skills::list_skills))
        .route("/api/experiences", get(routes::experiences::list_experiences))
        .route("/api/projects", get(routes::projects::list_projects))
        .route("/api/projects/{id}", get(routes::projects::get_project))
        .route("/api/blog", get(routes::blog::list_published_posts))
        .route("/api/blog/{slug}", get(routes::blog::get_published_post))
        .route("/api/contact", post(routes::contact::create_message))
        // admin dashboard
        .route("/api/admin/profile", put(routes::profile::update_profile))
        .route("/api/admin/skills", post(routes::skills::create_skill))
        .route(
            "/api/admin/skills/{id}",
            put(routes::skills::update_skill).delete(routes::skills::delete_skill),
        )
        .route(
            "/api/admin/experiences",
            post(routes::experiences::create_experience),
        )
        .route(
            "/api/admin/experiences/{id}",
            put(routes::experiences::update_experience)
                .delete(routes::experiences::delete_experience),
        )
        .route(
            "/api/admin/projects",
            get(routes::projects::list_projects_admin).post(routes::projects::create_project),
        )
        .route(
            "/api/admin/projects/{id}",
            put(routes::projects::update_project).delete(routes::projects::delete_project),
        )
        .route(
            "/api/admin/blog",
            get(routes::blog::list_posts_admin).post(routes::blog::create_post),
        )
        .route(
            "/api/admin/blog/{id}",
            put(routes::blog::update_post).delete(routes::blog::delete_post),
        )
        .route("/api/admin/contacts", get(routes::contact::list_messages))
        .route(
            "/api/admin/contacts/{id}/read",
            put(routes::contact::mark_message_read),
        )
        .route(
            "/api/admin/contacts/{id}",
            delete(routes::contact::delete_message),
        )
        .route("/health", get(routes::health::health_ping))
        .layer(logging::middleware::propagate_request_id_layer())
        .layer(middleware::from_fn(logging::middleware::log_request))
        .layer(logging::middleware::request_id_layer())
        .layer(TraceLayer::new_for_http())
        // Compress responses with gzip/br/zstd automatically
        .layer(CompressionLayer::new())
        // Global 2 MB request body cap — prevents unbounded buffering
        .layer(RequestBodyLimitLayer::new(2 * 1024 * 1024))
        .layer(cors)
        .with_state(state)
}

/// Run the server (used by main).
pub async fn run() {
    dotenvy::dotenv().ok();

    // Guards MUST be held for the programme's lifetime; dropping them early
    // shuts down background log-writer threads and loses buffered log lines.
    let _log_guards = logging::init();

    routes::health::init_start_time();

    // Refuse to start in production with the insecure default JWT secret.
    let environment = std::env::var("ENVIRONMENT").unwrap_or_default();
    if environment == "production" {
        let secret = std::env::var("JWT_SECRET").unwrap_or_default();
        if secret.is_empty() || secret == "default-jwt-secret-change-in-production" {
            panic!(
                "FATAL: JWT_SECRET must be set to a secure, unique value in production. \
                 Refusing to start with the default secret."
            );
        }

        // Warn (don't panic) about default admin credentials in production.
        if std::env::var("ADMIN_PASSWORD").is_err() {
            tracing::warn!(
                "SECURITY: ADMIN_PASSWORD is not set; the fallback default password \
                 'admin123' is insecure. Set ADMIN_PASSWORD to a strong value."
            );
        }
    }

    // The store is volatile: content lives for the lifetime of the process.
    let store = Arc::new(MemStore::new());
    let admin = store
        .create_user(NewUser {
            username: routes::auth::ADMIN_USERNAME.clone(),
            password: routes::auth::ADMIN_PASSWORD.clone(),
        })
        .await;
    tracing::info!("Seeded admin user: {}", admin.username);

    let app = create_app(AppState { store });

    // Bind address is configurable via HOST / PORT env vars, defaulting to
    // 127.0.0.1:3001 so existing dev setups keep working unchanged.
    let host = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(3001);
    let addr: SocketAddr = format!("{}:{}", host, port)
        .parse()
        .expect("Invalid HOST/PORT configuration");
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app).await.expect("Server error");
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    async fn test_app() -> Router {
        let store = Arc::new(MemStore::new());
        store
            .create_user(NewUser {
                username: "admin".to_string(),
                password: "admin123".to_string(),
            })
            .await;
        create_app(AppState { store })
    }

    #[tokio::test]
    async fn test_public_routes_are_wired() {
        let app = test_app().await;
        for uri in ["/health", "/api/profile", "/api/skills", "/api/experiences", "/api/projects", "/api/blog"] {
            let res = app
                .clone()
                .oneshot(Request::get(uri).body(Body::empty()).unwrap())
                .await
                .unwrap();
            assert_eq!(res.status(), StatusCode::OK, "GET {} should succeed", uri);
        }
    }

    #[tokio::test]
    async fn test_admin_routes_are_guarded() {
        let app = test_app().await;
        let res = app
            .clone()
            .oneshot(
                Request::get("/api/admin/contacts")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

        let res = app
            .oneshot(
                Request::put("/api/admin/profile")
                    .header("content-type", "application/json")
                    .body(Body::from("{}"))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_unknown_route_is_not_found() {
        let app = test_app().await;
        let res = app
            .oneshot(Request::get("/api/nope").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }
}
