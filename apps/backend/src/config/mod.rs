//! Environment-driven configuration.

pub mod app;
pub mod db;

use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::AppError;

pub use app::{AppConfig, RateLimitSettings, RuntimeEnv};
pub use db::DbSettings;

/// Source of configuration values; the process environment in production,
/// a map in tests.
pub trait Lookup: Fn(&str) -> Option<String> {}

impl<F: Fn(&str) -> Option<String>> Lookup for F {}

/// Reads the process environment.
pub fn env_lookup(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Load `.env` from the working directory or one of its parents into the
/// process environment. Variables already set are left alone. Returns the
/// file that was loaded, if any.
pub fn load_dotenv() -> Option<PathBuf> {
    dotenvy::dotenv().ok()
}

/// Load a specific env file; same precedence as [`load_dotenv`].
pub fn load_env_file(path: &Path) -> Result<(), AppError> {
    dotenvy::from_path(path)
        .map_err(|e| AppError::config(format!("failed to load {}: {e}", path.display())))
}

/// Parse an optional variable, falling back to `default` when unset or blank.
pub(crate) fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T, AppError>
where
    F: Lookup,
    T: FromStr,
{
    match lookup(key) {
        Some(raw) if !raw.trim().is_empty() => raw.trim().parse::<T>().map_err(|_| {
            AppError::config(format!("{key} has an invalid value: '{}'", raw.trim()))
        }),
        _ => Ok(default),
    }
}
