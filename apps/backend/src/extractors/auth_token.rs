use std::future::{ready, Ready};

use actix_web::{dev::Payload, http::header, FromRequest, HttpRequest};

use crate::error::AppError;
use crate::logging::security;

/// Bearer token taken from the Authorization header
#[derive(Debug, Clone)]
pub struct AuthToken {
    pub token: String,
}

impl AuthToken {
    /// Parse `Bearer <token>`; the scheme is matched case-insensitively.
    pub fn parse(value: &str) -> Option<Self> {
        let mut parts = value.split_whitespace();
        let scheme = parts.next()?;
        let token = parts.next()?;
        if !scheme.eq_ignore_ascii_case("bearer") || parts.next().is_some() {
            return None;
        }
        Some(Self {
            token: token.to_string(),
        })
    }

    pub fn from_req(req: &HttpRequest) -> Result<Self, AppError> {
        match req.headers().get(header::AUTHORIZATION) {
            None => {
                security::token_rejected("missing_header");
                Err(AppError::unauthorized())
            }
            Some(value) => value
                .to_str()
                .ok()
                .and_then(AuthToken::parse)
                .ok_or_else(|| {
                    security::token_rejected("malformed_header");
                    AppError::unauthorized()
                }),
        }
    }
}

impl FromRequest for AuthToken {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(Self::from_req(req))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_bearer_in_any_case() {
        assert_eq!(AuthToken::parse("Bearer abc").unwrap().token, "abc");
        assert_eq!(AuthToken::parse("bearer abc").unwrap().token, "abc");
        assert_eq!(AuthToken::parse("BEARER  abc ").unwrap().token, "abc");
    }

    #[test]
    fn rejects_other_shapes() {
        assert!(AuthToken::parse("").is_none());
        assert!(AuthToken::parse("Bearer").is_none());
        assert!(AuthToken::parse("Basic abc").is_none());
        assert!(AuthToken::parse("Bearer a b").is_none());
        assert!(AuthToken::parse("abc").is_none());
    }
}
