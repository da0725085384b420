//! Initialized Actix test service with the production routes and middleware.

use actix_web::body::BoxBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::Error as ActixError;
use actix_web::{web, App};

use crate::middleware::{RequestTrace, SecurityHeaders, StructuredLogger, TraceSpan};
use crate::state::app_state::AppState;

/// Build the app the way `main.rs` does, minus CORS and the background tasks.
pub async fn create_test_app(
    state: AppState,
) -> impl Service<actix_http::Request, Response = ServiceResponse<BoxBody>, Error = ActixError> {
    let app = App::new()
        .wrap(SecurityHeaders)
        .wrap(StructuredLogger)
        .wrap(TraceSpan)
        .wrap(RequestTrace)
        .app_data(web::Data::new(state))
        .configure(crate::routes::configure)
        .default_service(web::to(crate::routes::not_found));

    actix_web::test::init_service(app).await
}
