use std::sync::Arc;
use std::time::{Duration, Instant};

use actix_web::{web, App, HttpServer};
use backend::config::{load_dotenv, AppConfig, RuntimeEnv};
use backend::infra::db::{connect_pool, run_db_lifecycle};
use backend::infra::state::StateBuilder;
use backend::middleware::{
    cors_middleware, RequestTrace, SecurityHeaders, StructuredLogger, TraceSpan,
};
use backend::routes;
use backend::state::db_status::DbStatus;
use tracing::{info, warn};

mod telemetry;

/// How often idle rate-limit entries are dropped.
const RATE_LIMIT_SWEEP_INTERVAL: Duration = Duration::from_secs(60);

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // before tracing so RUST_LOG may come from the file
    let env_file = load_dotenv();
    telemetry::init_tracing();
    if let Some(path) = &env_file {
        info!(path = %path.display(), "loaded env file");
    }

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Invalid configuration: {e}");
            std::process::exit(1);
        }
    };

    if config.env == RuntimeEnv::Development && !config.insecure_defaults.is_empty() {
        warn!(
            variables = ?config.insecure_defaults,
            "using built-in development secrets; never run like this in production"
        );
    }

    let db = match connect_pool(&config.db).await {
        Ok(db) => db,
        Err(e) => {
            eprintln!("❌ Failed to create database pool: {e}");
            std::process::exit(1);
        }
    };

    let db_status = Arc::new(DbStatus::offline());
    let app_state = StateBuilder::from_config(&config)
        .with_db(db.clone())
        .with_db_status(db_status.clone())
        .build();

    // Serve immediately; the store comes online in the background.
    actix_web::rt::spawn(run_db_lifecycle(db, db_status, config.db.clone()));

    let limiter = app_state.rate_limiter.clone();
    actix_web::rt::spawn(async move {
        let mut ticker = tokio::time::interval(RATE_LIMIT_SWEEP_INTERVAL);
        loop {
            ticker.tick().await;
            let dropped = limiter.sweep(Instant::now());
            if dropped > 0 {
                tracing::debug!(dropped, "rate_limit_sweep");
            }
        }
    });

    info!(host = %config.host, port = config.port, "starting feedback backend");

    let data = web::Data::new(app_state);
    let origins = config.cors_allowed_origins.clone();

    HttpServer::new(move || {
        App::new()
            .wrap(cors_middleware(&origins))
            .wrap(SecurityHeaders)
            .wrap(StructuredLogger)
            .wrap(TraceSpan)
            .wrap(RequestTrace)
            .app_data(data.clone())
            .configure(routes::configure)
            .default_service(web::to(routes::not_found))
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
