use std::io::ErrorKind;
use std::path::Path;

use actix_web::http::header::ContentType;
use actix_web::{web, HttpResponse};

use crate::error::AppError;
use crate::state::app_state::AppState;

async fn serve(dir: &Path, file: &str) -> Result<HttpResponse, AppError> {
    match tokio::fs::read(dir.join(file)).await {
        Ok(bytes) => Ok(HttpResponse::Ok()
            .content_type(ContentType::html())
            .body(bytes)),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            Err(AppError::not_found(format!("{file} not found")))
        }
        Err(e) => Err(AppError::internal(format!("failed to read {file}: {e}"))),
    }
}

async fn index(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    serve(&app_state.static_dir, "index.html").await
}

async fn admin(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    serve(&app_state.static_dir, "admin.html").await
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(index))
        .route("/admin", web::get().to(admin));
}
