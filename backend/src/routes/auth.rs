use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use chrono::{Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use shared::{ApiError, LoginRequest, LoginResponse, SessionInfo};
use std::sync::Arc;

use crate::AppState;

use super::{AuthUser, Claims};

/// Accepts any non-empty username and password.
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<LoginRequest>,
) -> impl IntoResponse {
    if !payload.is_submittable() {
        return (
            StatusCode::BAD_REQUEST,
            Json(LoginResponse {
                success: false,
                token: None,
                message: "Invalid credentials".to_string(),
            }),
        )
            .into_response();
    }

    let token = match create_jwt(
        &state.config.jwt_secret,
        &payload.username,
        state.config.token_ttl_hours,
    ) {
        Ok(t) => t,
        Err(e) => {
            tracing::error!("Failed to sign token: {e}");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiError::internal_error("Failed to create session")),
            )
                .into_response();
        }
    };

    tracing::info!("Issued session for {}", payload.username);

    Json(LoginResponse {
        success: true,
        token: Some(token),
        message: "Login successful".to_string(),
    })
    .into_response()
}

pub async fn session(auth_user: AuthUser) -> Json<SessionInfo> {
    Json(SessionInfo {
        username: auth_user.username,
    })
}

fn create_jwt(
    secret: &str,
    username: &str,
    ttl_hours: i64,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = Utc::now();
    let exp = now + Duration::hours(ttl_hours);

    let claims = Claims {
        sub: username.to_string(),
        iat: now.timestamp() as usize,
        exp: exp.timestamp() as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}
