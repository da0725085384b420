use actix_web::{web, HttpResponse};
use serde::Serialize;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

use crate::error::AppError;
use crate::infra::db::backend_name;
use crate::services::feedback::count_feedback;
use crate::state::app_state::AppState;

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    database: &'static str,
    timestamp: String,
}

/// GET /api/health: liveness plus the current connectivity flag. Never fails.
async fn health(app_state: web::Data<AppState>) -> HttpResponse {
    let timestamp = OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_else(|_| "unknown".to_string());

    HttpResponse::Ok().json(HealthResponse {
        status: "OK",
        database: if app_state.db_status.is_online() {
            "CONNECTED"
        } else {
            "DISCONNECTED"
        },
        timestamp,
    })
}

#[derive(Debug, Serialize)]
struct TestDbResponse {
    success: bool,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    database: Option<&'static str>,
    status: &'static str,
}

impl TestDbResponse {
    fn failed(message: impl Into<String>, status: &'static str) -> Self {
        Self {
            success: false,
            message: message.into(),
            count: None,
            database: None,
            status,
        }
    }
}

/// GET /api/test-db: run a count against the store.
async fn test_db(app_state: web::Data<AppState>) -> HttpResponse {
    let offline = || {
        HttpResponse::ServiceUnavailable()
            .json(TestDbResponse::failed("Database connection failed", "OFFLINE"))
    };

    let Ok(db) = app_state.online_db() else {
        return offline();
    };

    match count_feedback(db).await {
        Ok(count) => HttpResponse::Ok().json(TestDbResponse {
            success: true,
            message: "Database connection OK".to_string(),
            count: Some(count),
            database: Some(backend_name(db)),
            status: "ONLINE",
        }),
        Err(AppError::DbUnavailable) => offline(),
        Err(e) => {
            tracing::error!(error = %e, "test_db query failed");
            HttpResponse::InternalServerError().json(TestDbResponse::failed(e.message(), "ERROR"))
        }
    }
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health))
        .route("/test-db", web::get().to(test_db));
}
