use std::time::{SystemTime, UNIX_EPOCH};

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::logging::security;
use crate::state::security_config::SecurityConfig;
use crate::AppError;

/// Claims carried by admin tokens.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct AdminClaims {
    pub admin: bool,
    /// Issued-at (seconds since epoch)
    pub iat: i64,
    /// Expiry (seconds since epoch)
    pub exp: i64,
}

/// Mint a HS256 admin token valid for `security.token_ttl`.
pub fn mint_admin_token(now: SystemTime, security: &SecurityConfig) -> Result<String, AppError> {
    let iat = now
        .duration_since(UNIX_EPOCH)
        .map_err(|_| AppError::internal("Failed to get current time"))?
        .as_secs() as i64;

    let claims = AdminClaims {
        admin: true,
        iat,
        exp: iat + security.token_ttl.as_secs() as i64,
    };

    encode(
        &Header::new(security.algorithm),
        &claims,
        &EncodingKey::from_secret(&security.jwt_secret),
    )
    .map_err(|e| AppError::internal(format!("Failed to encode JWT: {e}")))
}

/// Verify an admin token.
///
/// Every failure (expired, bad signature, malformed, `admin` not true) becomes
/// the same `AppError::Unauthorized`; the cause is only logged.
pub fn verify_admin_token(token: &str, security: &SecurityConfig) -> Result<AdminClaims, AppError> {
    // Default Validation already checks exp; pin algorithm to configured algorithm.
    let validation = Validation::new(security.algorithm);

    let claims = decode::<AdminClaims>(
        token,
        &DecodingKey::from_secret(&security.jwt_secret),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| {
        let reason = match e.kind() {
            ErrorKind::ExpiredSignature => "token_expired",
            ErrorKind::InvalidSignature => "invalid_signature",
            _ => "invalid_token",
        };
        security::token_rejected(reason);
        AppError::unauthorized()
    })?;

    if !claims.admin {
        security::token_rejected("not_admin");
        return Err(AppError::unauthorized());
    }

    Ok(claims)
}
