use actix_web::web;

use crate::error::AppError;

pub mod admin;
pub mod health;
pub mod pages;
pub mod submit;

/// Register every route. Shared by `main.rs` and the test app builder.
pub fn configure(cfg: &mut web::ServiceConfig) {
    // Pages: / and /admin
    cfg.configure(pages::configure_routes);

    // API: /api/submit, /api/admin/**, /api/health, /api/test-db
    cfg.service(
        web::scope("/api")
            .configure(submit::configure_routes)
            .configure(admin::configure_routes)
            .configure(health::configure_routes),
    );
}

/// Fallback for unmatched paths; register with `App::default_service`.
pub async fn not_found() -> Result<actix_web::HttpResponse, AppError> {
    Err(AppError::not_found("Not found"))
}
