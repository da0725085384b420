use std::time::Instant;

use actix_web::{web, HttpResponse};
use serde::Serialize;

use crate::error::AppError;
use crate::extractors::{ClientIp, ValidatedJson};
use crate::logging::security;
use crate::services::feedback::{self, submission_time, SubmitFeedback};
use crate::services::rate_limit::RateDecision;
use crate::state::app_state::AppState;

pub const MSG_SUBMITTED: &str = "Submitted successfully";

#[derive(Debug, Serialize)]
struct SubmitResponse {
    success: bool,
    message: &'static str,
    id: i32,
}

/// POST /api/submit
///
/// Rate limit, then connectivity, then body validation. The body is taken as
/// a `Result` so a malformed payload still counts against the limit.
async fn submit(
    app_state: web::Data<AppState>,
    client: ClientIp,
    body: Result<ValidatedJson<SubmitFeedback>, AppError>,
) -> Result<HttpResponse, AppError> {
    let quota = if client.is_loopback() {
        None
    } else {
        match app_state
            .rate_limiter
            .check(&client.rate_key(), Instant::now())
        {
            RateDecision::Allowed { limit, remaining } => Some((limit, remaining)),
            RateDecision::Limited { retry_after } => {
                security::rate_limit_hit("/api/submit", client.ip);
                return Err(AppError::rate_limited(RateDecision::retry_after_secs(
                    retry_after,
                )));
            }
        }
    };

    let db = app_state.online_db()?;
    let input = body?.into_inner();

    let id = feedback::submit_feedback(db, input, &client.stored_ip(), submission_time()?).await?;

    let mut response = HttpResponse::Ok();
    if let Some((limit, remaining)) = quota {
        response
            .insert_header(("x-ratelimit-limit", limit.to_string()))
            .insert_header(("x-ratelimit-remaining", remaining.to_string()));
    }
    Ok(response.json(SubmitResponse {
        success: true,
        message: MSG_SUBMITTED,
        id,
    }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/submit").route(web::post().to(submit)));
}
