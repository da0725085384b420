//! Security-relevant events, logged with a stable `event` field so they can be
//! filtered out of the request stream.

use std::net::IpAddr;

use tracing::warn;

use crate::trace_ctx;

/// Log a failed admin login.
pub fn login_failed() {
    let trace_id = trace_ctx::trace_id();

    warn!(
        event = "SECURITY_LOGIN_FAILED",
        %trace_id,
        "Admin authentication failure"
    );
}

/// Log a rejected admin token. `reason` never reaches the client.
pub fn token_rejected(reason: &str) {
    let trace_id = trace_ctx::trace_id();

    warn!(
        event = "SECURITY_TOKEN_REJECTED",
        %trace_id,
        reason,
        "Admin token rejected"
    );
}

/// Log a rate-limit hit on the submission endpoint.
pub fn rate_limit_hit(endpoint: &str, client: Option<IpAddr>) {
    let trace_id = trace_ctx::trace_id();
    let client = client.map(|ip| ip.to_string()).unwrap_or_else(|| "unknown".to_string());

    warn!(
        event = "SECURITY_RATE_LIMIT_HIT",
        %trace_id,
        endpoint,
        %client,
        "Rate limit exceeded"
    );
}
