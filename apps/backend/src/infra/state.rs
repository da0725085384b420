use std::net::IpAddr;
use std::path::PathBuf;
use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::config::{AppConfig, RateLimitSettings};
use crate::state::app_state::AppState;
use crate::state::db_status::DbStatus;
use crate::state::security_config::SecurityConfig;

/// Builder for creating AppState instances (used in both tests and main)
pub struct StateBuilder {
    security_config: SecurityConfig,
    db: Option<DatabaseConnection>,
    db_status: Arc<DbStatus>,
    rate_limit: RateLimitSettings,
    trusted_proxies: Vec<IpAddr>,
    static_dir: PathBuf,
}

impl StateBuilder {
    pub fn new(security_config: SecurityConfig) -> Self {
        Self {
            security_config,
            db: None,
            db_status: Arc::new(DbStatus::offline()),
            rate_limit: RateLimitSettings::default(),
            trusted_proxies: Vec::new(),
            static_dir: PathBuf::from("public"),
        }
    }

    /// Start from the runtime configuration.
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(SecurityConfig::new(
            config.jwt_secret.as_bytes().to_vec(),
            &config.admin_password,
        ))
        .with_rate_limit(config.rate_limit)
        .with_trusted_proxies(config.trusted_proxies.clone())
        .with_static_dir(config.static_dir.clone())
    }

    pub fn with_db(mut self, db: DatabaseConnection) -> Self {
        self.db = Some(db);
        self
    }
    pub fn with_db_status(mut self, status: Arc<DbStatus>) -> Self {
        self.db_status = status;
        self
    }
    pub fn with_security(mut self, security_config: SecurityConfig) -> Self {
        self.security_config = security_config;
        self
    }
    pub fn with_rate_limit(mut self, rate_limit: RateLimitSettings) -> Self {
        self.rate_limit = rate_limit;
        self
    }
    pub fn with_trusted_proxies(mut self, proxies: Vec<IpAddr>) -> Self {
        self.trusted_proxies = proxies;
        self
    }
    pub fn with_static_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.static_dir = dir.into();
        self
    }

    pub fn build(self) -> AppState {
        let mut state = AppState::new(
            self.db,
            self.db_status,
            self.security_config,
            self.rate_limit,
        );
        state.trusted_proxies = Arc::from(self.trusted_proxies);
        state.static_dir = self.static_dir;
        state
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RuntimeEnv;

    #[test]
    fn build_without_db_is_offline() {
        let state = StateBuilder::new(SecurityConfig::for_tests()).build();
        assert!(state.db().is_none());
        assert!(!state.db_status.is_online());
    }

    #[test]
    fn from_config_carries_limits_and_proxies() {
        let lookup = |key: &str| match key {
            "APP_ENV" => Some("development".to_string()),
            "RATE_LIMIT_MAX" => Some("3".to_string()),
            "TRUSTED_PROXIES" => Some("10.1.1.1".to_string()),
            "STATIC_DIR" => Some("/srv/pages".to_string()),
            _ => None,
        };
        let config = AppConfig::from_lookup(&lookup).unwrap();
        assert_eq!(config.env, RuntimeEnv::Development);

        let state = StateBuilder::from_config(&config).build();
        assert_eq!(state.rate_limiter.settings().max_requests, 3);
        assert!(state.is_trusted_proxy("10.1.1.1".parse().unwrap()));
        assert_eq!(state.static_dir, PathBuf::from("/srv/pages"));
        assert!(state.security.admin_password_matches("admin123"));
    }
}
