pub mod admin_session;
pub mod auth_token;
pub mod client_ip;
pub mod online_db;
pub mod validated_json;

use actix_web::{web, HttpRequest};

use crate::error::AppError;
use crate::state::app_state::AppState;

pub use admin_session::AdminSession;
pub use auth_token::AuthToken;
pub use client_ip::ClientIp;
pub use online_db::OnlineDb;
pub use validated_json::ValidatedJson;

/// Shared state registered on the app; its absence is a wiring bug.
pub(crate) fn app_state(req: &HttpRequest) -> Result<&web::Data<AppState>, AppError> {
    req.app_data::<web::Data<AppState>>()
        .ok_or_else(|| AppError::internal("AppState not available"))
}
