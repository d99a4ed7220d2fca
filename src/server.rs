use axum::{Json, Router, extract::State, http::StatusCode, routing::get};
use serde_json::{Value, json};
use sqlx::SqlitePool;
use tracing::warn;

/// Reports ok only while the database still answers.
pub async fn health_handler(State(pool): State<SqlitePool>) -> (StatusCode, Json<Value>) {
    match sqlx::query("SELECT 1").execute(&pool).await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({ "status": "ok", "database": "ok" })),
        ),
        Err(e) => {
            warn!("Health check failed: {e}");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({ "status": "error", "database": "unreachable" })),
            )
        }
    }
}

/// Build the main router. webhook_router comes from webhooks::axum_to_router,
/// or None to only serve /health (useful in tests).
pub fn build_router(pool: SqlitePool, webhook_router: Option<Router>) -> Router {
    let base = Router::new()
        .route("/health", get(health_handler))
        .with_state(pool);
    match webhook_router {
        Some(r) => base.merge(r),
        None => base,
    }
}
