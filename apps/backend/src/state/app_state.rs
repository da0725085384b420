use std::net::IpAddr;
use std::path::PathBuf;
use std::sync::Arc;

use sea_orm::DatabaseConnection;

use super::db_status::DbStatus;
use super::security_config::SecurityConfig;
use crate::config::RateLimitSettings;
use crate::error::AppError;
use crate::services::rate_limit::SubmitRateLimiter;

/// Application state containing shared resources
#[derive(Debug, Clone)]
pub struct AppState {
    /// Lazily connected pool (absent only in tests that never touch the store)
    pub db: Option<DatabaseConnection>,
    /// Connectivity as seen by handlers
    pub db_status: Arc<DbStatus>,
    /// JWT settings and admin password digest
    pub security: SecurityConfig,
    pub rate_limiter: Arc<SubmitRateLimiter>,
    /// Peers whose `X-Forwarded-For` header is honoured
    pub trusted_proxies: Arc<[IpAddr]>,
    /// Directory holding `index.html` and `admin.html`
    pub static_dir: PathBuf,
}

impl AppState {
    pub fn new(
        db: Option<DatabaseConnection>,
        db_status: Arc<DbStatus>,
        security: SecurityConfig,
        rate_limit: RateLimitSettings,
    ) -> Self {
        Self {
            db,
            db_status,
            security,
            rate_limiter: Arc::new(SubmitRateLimiter::new(rate_limit)),
            trusted_proxies: Arc::from(Vec::new()),
            static_dir: PathBuf::from("public"),
        }
    }

    pub fn db(&self) -> Option<&DatabaseConnection> {
        self.db.as_ref()
    }

    /// The pool, or `DbUnavailable` while the store is offline.
    pub fn online_db(&self) -> Result<&DatabaseConnection, AppError> {
        if !self.db_status.is_online() {
            return Err(AppError::db_unavailable());
        }
        self.db.as_ref().ok_or_else(AppError::db_unavailable)
    }

    pub fn is_trusted_proxy(&self, peer: IpAddr) -> bool {
        let peer = peer.to_canonical();
        self.trusted_proxies.iter().any(|p| p.to_canonical() == peer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(status: DbStatus) -> AppState {
        AppState::new(
            None,
            Arc::new(status),
            SecurityConfig::for_tests(),
            RateLimitSettings::default(),
        )
    }

    #[test]
    fn offline_state_refuses_db_access() {
        let err = state(DbStatus::offline()).online_db().unwrap_err();
        assert!(matches!(err, AppError::DbUnavailable));
    }

    #[test]
    fn online_without_pool_is_still_unavailable() {
        let err = state(DbStatus::online()).online_db().unwrap_err();
        assert!(matches!(err, AppError::DbUnavailable));
    }

    #[test]
    fn trusted_proxy_matching_ignores_ipv4_mapping() {
        let mut s = state(DbStatus::offline());
        s.trusted_proxies = Arc::from(vec!["10.0.0.2".parse::<IpAddr>().unwrap()]);

        assert!(s.is_trusted_proxy("10.0.0.2".parse().unwrap()));
        assert!(s.is_trusted_proxy("::ffff:10.0.0.2".parse().unwrap()));
        assert!(!s.is_trusted_proxy("10.0.0.3".parse().unwrap()));
    }
}
