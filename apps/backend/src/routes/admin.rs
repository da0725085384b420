use std::time::SystemTime;

use actix_web::{web, HttpRequest, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::auth::mint_admin_token;
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::extractors::{AdminSession, OnlineDb, ValidatedJson};
use crate::logging::security;
use crate::services::feedback;
use crate::state::app_state::AppState;

pub const MSG_DELETED: &str = "Deleted successfully";
pub const MSG_INVALID_ID: &str = "Invalid id";

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub password: Option<String>,
}

#[derive(Debug, Serialize)]
struct LoginResponse {
    success: bool,
    token: String,
}

#[derive(Debug, Serialize)]
struct DeleteResponse {
    success: bool,
    message: &'static str,
}

async fn login(
    app_state: web::Data<AppState>,
    body: ValidatedJson<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    let matches = body
        .password
        .as_deref()
        .is_some_and(|p| app_state.security.admin_password_matches(p));
    if !matches {
        security::login_failed();
        return Err(AppError::wrong_password());
    }

    let token = mint_admin_token(SystemTime::now(), &app_state.security)?;
    Ok(HttpResponse::Ok().json(LoginResponse {
        success: true,
        token,
    }))
}

// The token is checked only once OnlineDb has succeeded, so an offline store
// answers 503 without touching auth or the security log.
async fn list(db: OnlineDb, req: HttpRequest) -> Result<HttpResponse, AppError> {
    AdminSession::from_req(&req)?;
    let rows = feedback::list_feedback(db.conn()).await?;
    Ok(HttpResponse::Ok().json(rows))
}

async fn delete(
    db: OnlineDb,
    req: HttpRequest,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    AdminSession::from_req(&req)?;

    if let Some(id) = parse_record_id(&id)? {
        feedback::delete_feedback(db.conn(), id).await?;
    }
    Ok(HttpResponse::Ok().json(DeleteResponse {
        success: true,
        message: MSG_DELETED,
    }))
}

/// Decimal ids only. A number outside the id column's range names no record
/// and yields `None`.
fn parse_record_id(raw: &str) -> Result<Option<i32>, AppError> {
    let raw = raw.trim();
    let digits = raw.strip_prefix('-').unwrap_or(raw);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(AppError::invalid(ErrorCode::InvalidId, MSG_INVALID_ID));
    }
    Ok(raw.parse::<i32>().ok())
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/admin")
            .route("/login", web::post().to(login))
            .route("/list", web::get().to(list))
            .route("/delete/{id}", web::delete().to(delete)),
    );
}
