use axum::{
    extract::{Request, State},
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::{Json, Response},
};
use serde_json::Value;
use uuid::Uuid;

use crate::auth::Claims;
use crate::error::ApiError;
use crate::state::AppState;

/// Authenticated user context extracted from a verified token
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub user_id: Uuid,
    pub email: String,
}

impl From<Claims> for AuthUser {
    fn from(claims: Claims) -> Self {
        Self {
            user_id: claims.sub,
            email: claims.email,
        }
    }
}

/// Token verification gate for protected routes.
///
/// Extracts the bearer token, verifies it, and injects [`AuthUser`] into the
/// request extensions for downstream handlers. Every failure mode (missing
/// header, malformed header, bad signature, expired token) produces the same
/// 401 response; the specific cause is only logged.
pub async fn jwt_auth_middleware(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, (StatusCode, Json<Value>)> {
    let token = match extract_bearer_token(&headers) {
        Ok(token) => token,
        Err(reason) => {
            tracing::warn!("Rejected unauthenticated request: {}", reason);
            return Err(unauthorized());
        }
    };

    let claims = match state.tokens.verify(&token) {
        Ok(claims) => claims,
        Err(e) => {
            tracing::warn!("Token verification failed: {}", e);
            return Err(unauthorized());
        }
    };

    request.extensions_mut().insert(AuthUser::from(claims));

    Ok(next.run(request).await)
}

fn unauthorized() -> (StatusCode, Json<Value>) {
    let error = ApiError::unauthorized("Invalid or missing authentication token");
    (StatusCode::UNAUTHORIZED, Json(error.to_json()))
}

/// Extract the token from the Authorization header
fn extract_bearer_token(headers: &HeaderMap) -> Result<String, String> {
    let auth_header = headers
        .get("authorization")
        .ok_or_else(|| "Missing Authorization header".to_string())?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| "Invalid Authorization header format".to_string())?;

    if let Some(token) = auth_str.strip_prefix("Bearer ") {
        if token.trim().is_empty() {
            return Err("Empty bearer token".to_string());
        }
        Ok(token.to_string())
    } else {
        Err("Authorization header must use Bearer token format".to_string())
    }
}
