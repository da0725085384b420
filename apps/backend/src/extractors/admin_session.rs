use std::future::{ready, Ready};

use actix_web::{dev::Payload, FromRequest, HttpRequest};

use super::{app_state, AuthToken};
use crate::auth::{verify_admin_token, AdminClaims};
use crate::error::AppError;

/// A verified admin bearer token.
///
/// Extraction fails with a generic 401 for every cause; the cause is logged.
///
/// Actix builds every extractor of a handler before reporting the first
/// failure, so handlers that must not log rejections for requests already
/// refused for another reason call [`AdminSession::from_req`] themselves.
#[derive(Debug, Clone)]
pub struct AdminSession {
    pub claims: AdminClaims,
}

impl AdminSession {
    pub fn from_req(req: &HttpRequest) -> Result<Self, AppError> {
        let state = app_state(req)?;
        let token = AuthToken::from_req(req)?;
        let claims = verify_admin_token(&token.token, &state.security)?;
        Ok(Self { claims })
    }
}

impl FromRequest for AdminSession {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(Self::from_req(req))
    }
}

#[cfg(test)]
mod tests {
    use actix_web::test::TestRequest;
    use actix_web::web;

    use super::*;
    use crate::errors::ErrorCode;
    use crate::test_support::{bearer, create_test_state};

    #[actix_web::test]
    async fn extracts_claims_from_a_valid_bearer() {
        let state = create_test_state().build().await;
        let auth = bearer(&state.security);
        let (req, mut payload) = TestRequest::get()
            .app_data(web::Data::new(state))
            .insert_header(("Authorization", auth))
            .to_http_parts();

        let session = AdminSession::from_request(&req, &mut payload).await.unwrap();
        assert!(session.claims.admin);
    }

    #[actix_web::test]
    async fn missing_header_is_unauthorized() {
        let state = create_test_state().build().await;
        let req = TestRequest::get()
            .app_data(web::Data::new(state))
            .to_http_request();

        let err = AdminSession::from_req(&req).unwrap_err();
        assert_eq!(err.code(), ErrorCode::Unauthorized);
    }
}
