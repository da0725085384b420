use std::time::Duration;

use migration::MigrationCommand;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};

/// Private in-memory SQLite database without schema.
///
/// The pool holds exactly one connection, since every SQLite memory
/// connection is its own database.
pub async fn memory_db() -> DatabaseConnection {
    let mut opts = ConnectOptions::new("sqlite::memory:");
    opts.max_connections(1)
        .min_connections(1)
        .acquire_timeout(Duration::from_secs(5))
        .sqlx_logging(false);
    Database::connect(opts)
        .await
        .expect("connect in-memory sqlite")
}

/// In-memory SQLite database with the `feedbacks` table in place.
pub async fn migrated_memory_db() -> DatabaseConnection {
    let db = memory_db().await;
    migration::migrate(&db, MigrationCommand::Up)
        .await
        .expect("migrate in-memory sqlite");
    db
}
