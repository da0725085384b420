use actix_web::error::ResponseError;
use actix_web::http::{header, StatusCode};
use actix_web::HttpResponse;
use sea_orm::DbErr;
use serde::Serialize;
use thiserror::Error;

use crate::errors::ErrorCode;
use crate::trace_ctx;

/// Seconds a client should wait before retrying while the store is offline.
pub const DB_UNAVAILABLE_RETRY_AFTER_SECS: u64 = 30;

pub const MSG_DB_UNAVAILABLE: &str = "Database temporarily unavailable, please retry later";
pub const MSG_MISSING_FIELDS: &str = "Missing required fields";
pub const MSG_FIELD_TOO_LONG: &str = "A field exceeds its maximum length";
pub const MSG_RATE_LIMITED: &str = "Too many requests, please try again later";
pub const MSG_WRONG_PASSWORD: &str = "Wrong password";
pub const MSG_AUTH_FAILED: &str = "Authentication failed";

/// Error body shared by every failing endpoint.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub success: bool,
    pub message: String,
    pub code: &'static str,
    pub trace_id: String,
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {detail}")]
    Validation { code: ErrorCode, detail: String },
    #[error("Bad request: {detail}")]
    BadRequest { code: ErrorCode, detail: String },
    #[error("Rate limited (retry after {retry_after_secs}s)")]
    RateLimited { retry_after_secs: u64 },
    #[error("Unauthorized")]
    Unauthorized,
    #[error("Wrong password")]
    WrongPassword,
    #[error("Database unavailable")]
    DbUnavailable,
    #[error("Database error: {detail}")]
    Db { detail: String },
    #[error("Not found: {detail}")]
    NotFound { detail: String },
    #[error("Internal error: {detail}")]
    Internal { detail: String },
    #[error("Configuration error: {detail}")]
    Config { detail: String },
}

impl AppError {
    /// Stable error code for this variant.
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::Validation { code, .. } => *code,
            AppError::BadRequest { code, .. } => *code,
            AppError::RateLimited { .. } => ErrorCode::RateLimited,
            AppError::Unauthorized => ErrorCode::Unauthorized,
            AppError::WrongPassword => ErrorCode::WrongPassword,
            AppError::DbUnavailable => ErrorCode::DbUnavailable,
            AppError::Db { .. } => ErrorCode::DbError,
            AppError::NotFound { .. } => ErrorCode::NotFound,
            AppError::Internal { .. } => ErrorCode::Internal,
            AppError::Config { .. } => ErrorCode::ConfigError,
        }
    }

    /// Client-facing message. Auth failures never say which check failed.
    pub fn message(&self) -> String {
        match self {
            AppError::Validation { detail, .. } => detail.clone(),
            AppError::BadRequest { detail, .. } => detail.clone(),
            AppError::RateLimited { .. } => MSG_RATE_LIMITED.to_string(),
            AppError::Unauthorized => MSG_AUTH_FAILED.to_string(),
            AppError::WrongPassword => MSG_WRONG_PASSWORD.to_string(),
            AppError::DbUnavailable => MSG_DB_UNAVAILABLE.to_string(),
            AppError::Db { detail } => detail.clone(),
            AppError::NotFound { detail } => detail.clone(),
            AppError::Internal { .. } => "Internal server error".to_string(),
            AppError::Config { .. } => "Server misconfigured".to_string(),
        }
    }

    /// Get the HTTP status code for this error
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            AppError::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::WrongPassword => StatusCode::UNAUTHORIZED,
            AppError::DbUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Db { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Config { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn invalid(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self::Validation {
            code,
            detail: detail.into(),
        }
    }

    pub fn missing_fields() -> Self {
        Self::invalid(ErrorCode::MissingFields, MSG_MISSING_FIELDS)
    }

    pub fn field_too_long() -> Self {
        Self::invalid(ErrorCode::FieldTooLong, MSG_FIELD_TOO_LONG)
    }

    pub fn bad_request(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self::BadRequest {
            code,
            detail: detail.into(),
        }
    }

    pub fn rate_limited(retry_after_secs: u64) -> Self {
        Self::RateLimited { retry_after_secs }
    }

    pub fn unauthorized() -> Self {
        Self::Unauthorized
    }

    pub fn wrong_password() -> Self {
        Self::WrongPassword
    }

    pub fn db_unavailable() -> Self {
        Self::DbUnavailable
    }

    pub fn db(detail: impl Into<String>) -> Self {
        Self::Db {
            detail: detail.into(),
        }
    }

    pub fn not_found(detail: impl Into<String>) -> Self {
        Self::NotFound {
            detail: detail.into(),
        }
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        Self::Internal {
            detail: detail.into(),
        }
    }

    pub fn config(detail: impl Into<String>) -> Self {
        Self::Config {
            detail: detail.into(),
        }
    }
}

impl From<DbErr> for AppError {
    fn from(e: DbErr) -> Self {
        match e {
            DbErr::ConnectionAcquire(_) | DbErr::Conn(_) => AppError::DbUnavailable,
            other => AppError::db(other.to_string()),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        self.status()
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status();
        let trace_id = trace_ctx::trace_id();

        if status.is_server_error() {
            tracing::error!(code = %self.code(), error = %self, "request_failed");
        }

        let body = ErrorBody {
            success: false,
            message: self.message(),
            code: self.code().as_str(),
            trace_id: trace_id.clone(),
        };

        let mut builder = HttpResponse::build(status);
        builder.insert_header(("x-trace-id", trace_id));

        match self {
            AppError::Unauthorized | AppError::WrongPassword => {
                builder.insert_header((header::WWW_AUTHENTICATE, "Bearer"));
            }
            AppError::RateLimited { retry_after_secs } => {
                builder.insert_header((header::RETRY_AFTER, retry_after_secs.to_string()));
            }
            AppError::DbUnavailable => {
                builder.insert_header((
                    header::RETRY_AFTER,
                    DB_UNAVAILABLE_RETRY_AFTER_SECS.to_string(),
                ));
            }
            _ => {}
        }

        builder.json(body)
    }
}

#[cfg(test)]
mod tests {
    use actix_web::body::to_bytes;
    use sea_orm::RuntimeErr;
    use serde_json::Value;

    use super::*;

    async fn body_of(err: &AppError) -> Value {
        let resp = err.error_response();
        let bytes = to_bytes(resp.into_body()).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[actix_web::test]
    async fn auth_errors_are_generic() {
        let body = body_of(&AppError::unauthorized()).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], MSG_AUTH_FAILED);
        assert_eq!(body["code"], "UNAUTHORIZED");

        let resp = AppError::wrong_password().error_response();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            resp.headers().get(header::WWW_AUTHENTICATE).unwrap(),
            "Bearer"
        );
    }

    #[actix_web::test]
    async fn rate_limited_sets_retry_after() {
        let resp = AppError::rate_limited(42).error_response();
        assert_eq!(resp.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(resp.headers().get(header::RETRY_AFTER).unwrap(), "42");
    }

    #[actix_web::test]
    async fn db_errors_pass_message_through() {
        let body = body_of(&AppError::db("Submission failed: boom")).await;
        assert_eq!(body["message"], "Submission failed: boom");
        assert_eq!(body["code"], "DB_ERROR");
    }

    #[actix_web::test]
    async fn internal_errors_hide_detail() {
        let body = body_of(&AppError::internal("secret stack")).await;
        assert_eq!(body["message"], "Internal server error");
    }

    #[test]
    fn connection_failures_map_to_unavailable() {
        let err: AppError = DbErr::Conn(RuntimeErr::Internal("refused".into())).into();
        assert!(matches!(err, AppError::DbUnavailable));
        assert_eq!(err.status(), StatusCode::SERVICE_UNAVAILABLE);

        let err: AppError = DbErr::Query(RuntimeErr::Internal("no such table".into())).into();
        assert!(matches!(err, AppError::Db { .. }));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[actix_web::test]
    async fn trace_id_header_matches_body() {
        let resp = crate::trace_ctx::with_trace_id("trace-abc".to_string(), async {
            AppError::missing_fields().error_response()
        })
        .await;
        assert_eq!(resp.headers().get("x-trace-id").unwrap(), "trace-abc");
        let bytes = to_bytes(resp.into_body()).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["trace_id"], "trace-abc");
        assert_eq!(body["message"], MSG_MISSING_FIELDS);
    }
}
