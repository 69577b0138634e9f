use axum::{extract::State, http::StatusCode, response::Json};

use crate::database::models::PublicUser;
use crate::error::ApiError;
use crate::services::auth_service::{self, LoginRequest, LoginResponse, RegisterRequest};
use crate::state::AppState;

/// POST /api/auth/register - Create a new user account
///
/// Expected input:
/// ```json
/// {
///   "firstname": "John",
///   "lastname": "Doe",
///   "email": "john@example.com",
///   "password": "P@ssw0rd!"
/// }
/// ```
///
/// Returns 201 with the new user's public fields. The password hash is never
/// part of any response.
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<PublicUser>), ApiError> {
    let user = auth_service::register(&state.pool, request).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// POST /api/auth/login - Authenticate and receive a bearer token
///
/// Returns 200 with `{ token, user }` on success. Every credential failure
/// returns the same 401 response.
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let response = auth_service::login(&state.pool, &state.tokens, request).await?;
    Ok(Json(response))
}
