use std::path::PathBuf;
use std::sync::Arc;

use crate::config::RateLimitSettings;
use crate::infra::state::StateBuilder;
use crate::state::app_state::AppState;
use crate::state::db_status::DbStatus;
use crate::state::security_config::SecurityConfig;

use super::db::migrated_memory_db;

/// Builder for test AppState instances.
///
/// Defaults: no store, status offline, [`SecurityConfig::for_tests`], default
/// rate limits.
pub struct TestStateBuilder {
    inner: StateBuilder,
    with_db: bool,
    online: Option<bool>,
}

impl TestStateBuilder {
    pub fn new() -> Self {
        Self {
            inner: StateBuilder::new(SecurityConfig::for_tests()),
            with_db: false,
            online: None,
        }
    }

    /// Attach a migrated in-memory SQLite store and mark it online.
    pub fn with_db(mut self) -> Self {
        self.with_db = true;
        self
    }

    /// Force the connectivity flag, e.g. an attached store reported offline.
    pub fn online(mut self, online: bool) -> Self {
        self.online = Some(online);
        self
    }

    pub fn with_security(mut self, security_config: SecurityConfig) -> Self {
        self.inner = self.inner.with_security(security_config);
        self
    }

    pub fn with_rate_limit(mut self, rate_limit: RateLimitSettings) -> Self {
        self.inner = self.inner.with_rate_limit(rate_limit);
        self
    }

    pub fn with_trusted_proxies(mut self, proxies: Vec<std::net::IpAddr>) -> Self {
        self.inner = self.inner.with_trusted_proxies(proxies);
        self
    }

    pub fn with_static_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.inner = self.inner.with_static_dir(dir);
        self
    }

    pub async fn build(self) -> AppState {
        let online = self.online.unwrap_or(self.with_db);
        let status = if online {
            DbStatus::online()
        } else {
            DbStatus::offline()
        };

        let mut inner = self.inner.with_db_status(Arc::new(status));
        if self.with_db {
            inner = inner.with_db(migrated_memory_db().await);
        }
        inner.build()
    }
}

impl Default for TestStateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn create_test_state() -> TestStateBuilder {
    TestStateBuilder::new()
}
