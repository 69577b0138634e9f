use axum::{extract::State, response::Json, Extension};

use crate::database::models::PublicUser;
use crate::database::users;
use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::state::AppState;

/// POST /api/user/me - Current user's public profile
///
/// The identity comes from the verified token. A token whose user record no
/// longer exists is treated like any other invalid token.
pub async fn me(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> Result<Json<PublicUser>, ApiError> {
    let user = users::find_by_id(&state.pool, auth_user.user_id)
        .await?
        .ok_or_else(|| ApiError::unauthorized("Invalid or missing authentication token"))?;

    Ok(Json(PublicUser::from(user)))
}
