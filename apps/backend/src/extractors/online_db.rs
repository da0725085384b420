use std::future::{ready, Ready};

use actix_web::{dev::Payload, FromRequest, HttpRequest};
use sea_orm::DatabaseConnection;

use super::app_state;
use crate::error::AppError;

/// Pool handle for handlers that need the store; 503 while offline.
#[derive(Debug, Clone)]
pub struct OnlineDb(pub DatabaseConnection);

impl OnlineDb {
    pub fn conn(&self) -> &DatabaseConnection {
        &self.0
    }
}

impl FromRequest for OnlineDb {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(
            app_state(req)
                .and_then(|state| state.online_db().cloned())
                .map(OnlineDb),
        )
    }
}
