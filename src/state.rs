use sqlx::PgPool;

use crate::auth::TokenService;

/// Shared application state. Read-only after startup: the pool manages its
/// own connections and the token service holds the signing keys.
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub tokens: TokenService,
}
