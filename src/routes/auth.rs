/**
 * Authentication Routes
 * JWT-based login and token verification for the admin dashboard
 */
use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    Json,
};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::routes::{bad_request, require_auth, ApiError, AppJson, ErrorResponse};
use crate::store::models::User;
use crate::AppState;

// ============================================================================
// Configuration
// ============================================================================

lazy_static::lazy_static! {
    /// JWT signing secret from environment
    pub static ref JWT_SECRET: String = std::env::var("JWT_SECRET")
        .unwrap_or_else(|_| "default-jwt-secret-change-in-production".to_string());

    /// Admin username used to seed the credential store at startup
    pub static ref ADMIN_USERNAME: String = std::env::var("ADMIN_USERNAME")
        .unwrap_or_else(|_| "admin".to_string());

    /// Admin password used to seed the credential store at startup
    pub static ref ADMIN_PASSWORD: String = std::env::var("ADMIN_PASSWORD")
        .unwrap_or_else(|_| "admin123".to_string());
}

/// Access token expiry in hours
const TOKEN_EXPIRY_HOURS: i64 = 24;

// ============================================================================
// Types
// ============================================================================

/// JWT Claims structure
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: i64,         // User ID
    pub username: String, // Username
    pub exp: i64,         // Expiry timestamp
    pub iat: i64,         // Issued at timestamp
}

/// User info returned to the frontend
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AuthUser {
    pub id: i64,
    pub username: String,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: AuthUser,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct VerifyResponse {
    pub valid: bool,
    pub user: AuthUser,
}

// ============================================================================
// Token helpers
// ============================================================================

/// Create a signed access token for a user, valid for 24 hours.
pub fn create_access_token(user: &User) -> Result<String, jsonwebtoken::errors::Error> {
    let now = Utc::now();
    let exp = now + Duration::hours(TOKEN_EXPIRY_HOURS);

    let claims = Claims {
        sub: user.id,
        username: user.username.clone(),
        exp: exp.timestamp(),
        iat: now.timestamp(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(JWT_SECRET.as_bytes()),
    )
}

/// Verify and decode an access token. Malformed, badly signed, and expired
/// tokens all come back as the same error kind for callers.
pub fn verify_access_token(token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(JWT_SECRET.as_bytes()),
        &Validation::default(),
    )?;
    Ok(token_data.claims)
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /api/auth/login
/// Authenticate with username/password and return a bearer token
pub async fn login(
    State(state): State<AppState>,
    AppJson(payload): AppJson<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    if payload.username.is_empty() || payload.password.is_empty() {
        return Err(bad_request("Username and password are required"));
    }

    let user = state.store.get_user_by_username(&payload.username).await;

    // Unknown user and wrong password are indistinguishable to the caller
    let user = match user {
        Some(u) if u.password == payload.password => u,
        _ => {
            tracing::warn!("Failed login attempt for: {}", payload.username);
            return Err((
                StatusCode::UNAUTHORIZED,
                Json(ErrorResponse::new("Invalid credentials")),
            ));
        }
    };

    let token = create_access_token(&user).map_err(|e| {
        tracing::error!("Failed to create access token: {}", e);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::new("Internal server error")),
        )
    })?;

    tracing::info!("Successful login for user: {}", user.username);

    Ok(Json(LoginResponse {
        token,
        user: AuthUser {
            id: user.id,
            username: user.username,
        },
    }))
}

/// POST /api/auth/verify
/// Verify the bearer token and echo back the authenticated user
pub async fn verify_token(headers: HeaderMap) -> Result<Json<VerifyResponse>, ApiError> {
    let claims = require_auth(&headers)?;
    Ok(Json(VerifyResponse {
        valid: true,
        user: AuthUser {
            id: claims.sub,
            username: claims.username,
        },
    }))
}
