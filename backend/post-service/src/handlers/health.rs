/// Health endpoints for container probes
use crate::config::SERVICE_NAME;
use actix_web::{web, HttpResponse};
use sqlx::SqlitePool;

/// Store connectivity check
/// GET /health
pub async fn health_summary(pool: web::Data<SqlitePool>) -> HttpResponse {
    match sqlx::query("SELECT 1").execute(pool.get_ref()).await {
        Ok(_) => HttpResponse::Ok().json(serde_json::json!({
            "status": "ok",
            "service": SERVICE_NAME,
            "version": env!("CARGO_PKG_VERSION")
        })),
        Err(e) => {
            tracing::warn!(error = %e, "health check failed");
            HttpResponse::ServiceUnavailable().json(serde_json::json!({
                "status": "unhealthy",
                "error": format!("Database connection failed: {}", e),
                "service": SERVICE_NAME
            }))
        }
    }
}

/// GET /health/live
pub async fn liveness_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({"alive": true}))
}
