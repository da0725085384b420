use std::time::Duration;

use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};

use super::{parse_or, Lookup};
use crate::error::AppError;

/// Schema bootstrap attempts at startup before falling back to offline mode.
pub const BOOTSTRAP_ATTEMPTS: u32 = 5;
/// Fixed delay between schema bootstrap attempts.
pub const BOOTSTRAP_INTERVAL: Duration = Duration::from_secs(2);

/// Database connection settings resolved from the environment.
#[derive(Debug, Clone, PartialEq)]
pub struct DbSettings {
    /// Full connection URL (mysql://, sqlite:, postgres://)
    pub url: String,
    pub max_connections: u32,
    pub acquire_timeout: Duration,
    pub bootstrap_attempts: u32,
    pub bootstrap_interval: Duration,
    /// Period of the connectivity watcher after bootstrap
    pub reconnect_interval: Duration,
}

impl DbSettings {
    pub fn from_lookup<F: Lookup>(lookup: &F) -> Result<Self, AppError> {
        Ok(Self {
            url: db_url(lookup),
            max_connections: parse_or(lookup, "DB_MAX_CONNECTIONS", 10)?,
            acquire_timeout: Duration::from_secs(parse_or(lookup, "DB_ACQUIRE_TIMEOUT_SECS", 10)?),
            bootstrap_attempts: BOOTSTRAP_ATTEMPTS,
            bootstrap_interval: BOOTSTRAP_INTERVAL,
            reconnect_interval: Duration::from_secs(parse_or(
                lookup,
                "DB_RECONNECT_INTERVAL_SECS",
                30,
            )?),
        })
    }

    /// Settings for a local URL with fast bootstrap, used by tests and tooling.
    pub fn for_url(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_connections: 1,
            acquire_timeout: Duration::from_secs(2),
            bootstrap_attempts: 1,
            bootstrap_interval: Duration::from_millis(10),
            reconnect_interval: Duration::from_secs(1),
        }
    }
}

/// Builds the database URL: `DATABASE_URL` wins, otherwise a MySQL URL from
/// the `MYSQL_*` variables.
pub fn db_url<F: Lookup>(lookup: &F) -> String {
    if let Some(url) = lookup("DATABASE_URL").filter(|u| !u.trim().is_empty()) {
        return url;
    }

    let host = lookup("MYSQL_HOST").unwrap_or_else(|| "mysql".to_string());
    let port = lookup("MYSQL_PORT").unwrap_or_else(|| "3306".to_string());
    let user = lookup("MYSQL_USER").unwrap_or_else(|| "root".to_string());
    let password = lookup("MYSQL_PASSWORD").unwrap_or_default();
    let database = lookup("MYSQL_DATABASE").unwrap_or_else(|| "mysql".to_string());

    let user = utf8_percent_encode(&user, NON_ALPHANUMERIC);
    if password.is_empty() {
        format!("mysql://{user}@{host}:{port}/{database}")
    } else {
        let password = utf8_percent_encode(&password, NON_ALPHANUMERIC);
        format!("mysql://{user}:{password}@{host}:{port}/{database}")
    }
}

/// Mask the password portion of a connection URL for logging.
pub fn redact_db_url(url: &str) -> String {
    let Some(scheme_end) = url.find("://") else {
        return url.to_string();
    };
    let rest = &url[scheme_end + 3..];
    let Some(at) = rest.rfind('@') else {
        return url.to_string();
    };
    let userinfo = &rest[..at];
    match userinfo.find(':') {
        Some(colon) => format!(
            "{}{}:***{}",
            &url[..scheme_end + 3],
            &userinfo[..colon],
            &rest[at..]
        ),
        None => url.to_string(),
    }
}
