//! Pool construction, schema bootstrap and the connectivity watcher.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use migration::MigrationCommand;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseBackend, DatabaseConnection};
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::config::db::{redact_db_url, DbSettings};
use crate::error::AppError;
use crate::state::db_status::DbStatus;

/// Build the pool without opening a connection; the first statement connects.
pub async fn connect_pool(settings: &DbSettings) -> Result<DatabaseConnection, AppError> {
    let mut opts = ConnectOptions::new(settings.url.clone());
    opts.max_connections(settings.max_connections)
        .connect_timeout(settings.acquire_timeout)
        .acquire_timeout(settings.acquire_timeout)
        .connect_lazy(true)
        .sqlx_logging(false);

    info!(
        url = %redact_db_url(&settings.url),
        max_connections = settings.max_connections,
        "db_pool=created lazy=true"
    );
    Ok(Database::connect(opts).await?)
}

/// Retry an operation with a fixed delay; returns the last error on exhaustion.
async fn retry_fixed<T, F, Fut>(
    mut op: F,
    max_attempts: u32,
    interval: Duration,
) -> Result<T, AppError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, AppError>>,
{
    let mut last_error = None;

    for attempt in 1..=max_attempts.max(1) {
        match op().await {
            Ok(value) => {
                if attempt > 1 {
                    info!(attempt, "db_bootstrap_retry=success");
                }
                return Ok(value);
            }
            Err(e) => {
                warn!(attempt, max_attempts, error = %e, "db_bootstrap_retry=failed");
                last_error = Some(e);
                if attempt < max_attempts {
                    tokio::time::sleep(interval).await;
                }
            }
        }
    }

    Err(last_error.unwrap_or_else(|| AppError::internal("retry loop recorded no error")))
}

async fn ensure_schema(db: &DatabaseConnection) -> Result<(), AppError> {
    migration::migrate(db, MigrationCommand::Up).await?;
    Ok(())
}

/// Create the schema with bounded retries and mark the store online on success.
///
/// Exhaustion is not fatal: the status stays offline and the watcher keeps trying.
pub async fn bootstrap_schema(db: &DatabaseConnection, status: &DbStatus, settings: &DbSettings) -> bool {
    match retry_fixed(
        || ensure_schema(db),
        settings.bootstrap_attempts,
        settings.bootstrap_interval,
    )
    .await
    {
        Ok(()) => {
            status.mark_online();
            info!(backend = backend_name(db), "db_bootstrap=ready");
            true
        }
        Err(e) => {
            status.mark_offline();
            warn!(
                attempts = settings.bootstrap_attempts,
                error = %e,
                "db_bootstrap=exhausted, continuing in offline mode"
            );
            false
        }
    }
}

/// One watcher pass: ping while online, re-run the schema setup while offline.
/// Returns the resulting online state.
pub async fn check_connectivity(db: &DatabaseConnection, status: &DbStatus) -> bool {
    if status.is_online() {
        if let Err(e) = db.ping().await {
            warn!(error = %e, "db_ping=failed");
            status.mark_offline();
        }
    } else {
        match ensure_schema(db).await {
            Ok(()) => {
                status.mark_online();
            }
            Err(e) => debug!(error = %e, "db_reconnect=failed"),
        }
    }
    status.is_online()
}

/// Bootstrap, then watch connectivity forever at `settings.reconnect_interval`.
pub async fn run_db_lifecycle(db: DatabaseConnection, status: Arc<DbStatus>, settings: DbSettings) {
    bootstrap_schema(&db, &status, &settings).await;

    let mut ticker = tokio::time::interval(settings.reconnect_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // first tick completes immediately
    ticker.tick().await;

    loop {
        ticker.tick().await;
        check_connectivity(&db, &status).await;
    }
}

/// Human name of the connected backend.
pub fn backend_name(db: &DatabaseConnection) -> &'static str {
    match db.get_database_backend() {
        DatabaseBackend::MySql => "MySQL",
        DatabaseBackend::Sqlite => "SQLite",
        DatabaseBackend::Postgres => "PostgreSQL",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::db::memory_db;

    fn unreachable_mysql() -> DbSettings {
        let mut settings = DbSettings::for_url("mysql://root@127.0.0.1:1/feedback");
        settings.acquire_timeout = Duration::from_millis(300);
        settings.bootstrap_attempts = 2;
        settings
    }

    #[tokio::test]
    async fn lazy_pool_builds_without_a_server() {
        let db = connect_pool(&unreachable_mysql()).await.unwrap();
        assert_eq!(backend_name(&db), "MySQL");
    }

    #[tokio::test]
    async fn bootstrap_exhaustion_leaves_status_offline() {
        let settings = unreachable_mysql();
        let db = connect_pool(&settings).await.unwrap();
        let status = DbStatus::offline();

        assert!(!bootstrap_schema(&db, &status, &settings).await);
        assert!(!status.is_online());
    }

    #[tokio::test]
    async fn bootstrap_creates_schema_and_goes_online() {
        let db = memory_db().await;
        let status = DbStatus::offline();

        assert!(bootstrap_schema(&db, &status, &DbSettings::for_url("sqlite::memory:")).await);
        assert!(status.is_online());
        assert_eq!(backend_name(&db), "SQLite");
    }

    #[tokio::test]
    async fn watcher_recovers_offline_store() {
        let db = memory_db().await;
        let status = DbStatus::offline();

        assert!(check_connectivity(&db, &status).await);
        assert!(status.is_online());
    }

    #[tokio::test]
    async fn watcher_marks_unreachable_store_offline() {
        let db = connect_pool(&unreachable_mysql()).await.unwrap();
        let status = DbStatus::online();

        assert!(!check_connectivity(&db, &status).await);
        assert!(!status.is_online());
    }

    #[tokio::test]
    async fn retry_stops_at_first_success() {
        let mut calls = 0;
        let result = retry_fixed(
            || {
                calls += 1;
                let n = calls;
                async move {
                    if n < 2 {
                        Err(AppError::db_unavailable())
                    } else {
                        Ok(n)
                    }
                }
            },
            5,
            Duration::from_millis(1),
        )
        .await
        .unwrap();
        assert_eq!(result, 2);
        assert_eq!(calls, 2);
    }
}
