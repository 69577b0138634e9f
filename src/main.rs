use axum::{
    extract::State,
    http::{HeaderValue, StatusCode},
    routing::{get, post, put},
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

mod auth;
mod config;
mod database;
mod error;
mod handlers;
mod middleware;
mod services;
mod state;

use state::AppState;

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    // Initialize configuration (this loads the config singleton)
    let config = config::config();
    tracing::info!("Starting Biblio API in {:?} mode", config.environment);

    let tokens = auth::TokenService::from_config(&config.security)
        .unwrap_or_else(|e| panic!("invalid security configuration: {}", e));

    let pool = database::manager::connect(&config.database)
        .unwrap_or_else(|e| panic!("failed to initialize database pool: {}", e));

    let app = app(AppState { pool, tokens }, &config.security);

    // Allow tests or deployments to override port via env
    let port = std::env::var("BIBLIO_API_PORT")
        .ok()
        .or_else(|| std::env::var("PORT").ok())
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(3000);

    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", bind_addr, e));

    tracing::info!("Biblio API listening on http://{}", bind_addr);

    axum::serve(listener, app).await.expect("server");
}

fn app(state: AppState, security: &config::SecurityConfig) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .merge(public_routes())
        .merge(protected_routes(state.clone()))
        .layer(cors_layer(security))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn public_routes() -> Router<AppState> {
    use handlers::public::{auth, books};

    Router::new()
        // Token acquisition
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/login", post(auth::login))
        // Read-only book surface
        .route("/api/books", get(books::books_list))
        .route("/api/books/:id", get(books::book_get))
}

fn protected_routes(state: AppState) -> Router<AppState> {
    use handlers::protected::{books, user};

    Router::new()
        .route("/api/user/me", post(user::me))
        // All mutating book routes sit behind the token gate
        .route("/api/books", post(books::book_create))
        .route(
            "/api/books/:id",
            put(books::book_update).delete(books::book_delete),
        )
        .route_layer(axum::middleware::from_fn_with_state(
            state,
            middleware::jwt_auth_middleware,
        ))
}

fn cors_layer(security: &config::SecurityConfig) -> CorsLayer {
    if !security.enable_cors {
        return CorsLayer::new();
    }

    if security.cors_origins.is_empty() {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = security
        .cors_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}

async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "name": "Biblio API",
        "version": version,
        "description": "Book library REST backend built with Rust (Axum)",
        "endpoints": {
            "auth": "/api/auth/register, /api/auth/login (public - token acquisition)",
            "user": "/api/user/me (protected)",
            "books": "/api/books[/:id] (GET public; POST/PUT/DELETE protected)",
            "health": "/health (public)",
        }
    }))
}

async fn health(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    let now = chrono::Utc::now();

    match database::manager::health_check(&state.pool).await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "timestamp": now,
                "database": "ok"
            })),
        ),
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "status": "degraded",
                "timestamp": now,
                "database_error": e.to_string()
            })),
        ),
    }
}
