use std::net::IpAddr;
use std::path::PathBuf;
use std::time::Duration;

use super::{parse_or, DbSettings, Lookup};
use crate::error::AppError;

const DEV_JWT_SECRET: &str = "Hospital_Secure_Key_025";
const DEV_ADMIN_PASSWORD: &str = "admin123";

/// Runtime mode. Production is the default and refuses insecure secrets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeEnv {
    Production,
    Development,
}

/// Sliding-window limits for `/api/submit`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitSettings {
    pub max_requests: u32,
    pub window: Duration,
}

impl Default for RateLimitSettings {
    fn default() -> Self {
        Self {
            max_requests: 10,
            window: Duration::from_secs(10 * 60),
        }
    }
}

/// Everything the binary needs to start.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: RuntimeEnv,
    pub host: String,
    pub port: u16,
    pub db: DbSettings,
    pub jwt_secret: String,
    pub admin_password: String,
    pub rate_limit: RateLimitSettings,
    pub trusted_proxies: Vec<IpAddr>,
    pub static_dir: PathBuf,
    pub cors_allowed_origins: Vec<String>,
    /// Secrets that fell back to built-in development values
    pub insecure_defaults: Vec<&'static str>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(&super::env_lookup)
    }

    pub fn from_lookup<F: Lookup>(lookup: &F) -> Result<Self, AppError> {
        let env = match lookup("APP_ENV")
            .map(|v| v.trim().to_ascii_lowercase())
            .as_deref()
        {
            None | Some("") | Some("production") | Some("prod") => RuntimeEnv::Production,
            Some("development") | Some("dev") => RuntimeEnv::Development,
            Some(other) => {
                return Err(AppError::config(format!(
                    "APP_ENV must be 'production' or 'development', got '{other}'"
                )))
            }
        };

        let mut insecure_defaults = Vec::new();
        let jwt_secret = secret(lookup, env, "JWT_SECRET", DEV_JWT_SECRET, &mut insecure_defaults)?;
        let admin_password = secret(
            lookup,
            env,
            "ADMIN_PASSWORD",
            DEV_ADMIN_PASSWORD,
            &mut insecure_defaults,
        )?;

        let rate_limit = RateLimitSettings {
            max_requests: parse_or(lookup, "RATE_LIMIT_MAX", 10)?,
            window: Duration::from_secs(parse_or(lookup, "RATE_LIMIT_WINDOW_SECS", 600)?),
        };
        if rate_limit.max_requests == 0 || rate_limit.window.is_zero() {
            return Err(AppError::config(
                "RATE_LIMIT_MAX and RATE_LIMIT_WINDOW_SECS must be greater than zero",
            ));
        }

        let port: u16 = parse_or(lookup, "PORT", 8080)?;

        Ok(Self {
            env,
            host: lookup("HOST")
                .filter(|h| !h.trim().is_empty())
                .unwrap_or_else(|| "0.0.0.0".to_string()),
            port,
            db: DbSettings::from_lookup(lookup)?,
            jwt_secret,
            admin_password,
            rate_limit,
            trusted_proxies: trusted_proxies(lookup)?,
            static_dir: lookup("STATIC_DIR")
                .filter(|d| !d.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("public")),
            cors_allowed_origins: cors_origins(lookup, port),
            insecure_defaults,
        })
    }
}

fn secret<F: Lookup>(
    lookup: &F,
    env: RuntimeEnv,
    key: &'static str,
    dev_default: &str,
    insecure_defaults: &mut Vec<&'static str>,
) -> Result<String, AppError> {
    match lookup(key).filter(|v| !v.is_empty()) {
        Some(value) => Ok(value),
        None if env == RuntimeEnv::Development => {
            insecure_defaults.push(key);
            Ok(dev_default.to_string())
        }
        None => Err(AppError::config(format!(
            "{key} must be set when APP_ENV=production"
        ))),
    }
}

fn trusted_proxies<F: Lookup>(lookup: &F) -> Result<Vec<IpAddr>, AppError> {
    lookup("TRUSTED_PROXIES")
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<IpAddr>()
                .map_err(|_| AppError::config(format!("TRUSTED_PROXIES contains an invalid IP: '{s}'")))
        })
        .collect()
}

// Comma-separated origins, ignoring empty / "null" entries and anything
// without an http(s) scheme.
fn cors_origins<F: Lookup>(lookup: &F, port: u16) -> Vec<String> {
    let configured: Vec<String> = lookup("CORS_ALLOWED_ORIGINS")
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty() && *s != "null")
        .filter(|s| s.starts_with("http://") || s.starts_with("https://"))
        .map(str::to_string)
        .collect();

    if configured.is_empty() {
        vec![
            format!("http://localhost:{port}"),
            format!("http://127.0.0.1:{port}"),
        ]
    } else {
        configured
    }
}
