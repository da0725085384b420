mod common;

use std::collections::HashMap;

use std::io::Write;

use backend::config::{load_env_file, AppConfig, RuntimeEnv};
use serial_test::serial;

fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

#[test]
fn development_falls_back_and_reports_it() {
    let config = AppConfig::from_lookup(&lookup_from(&[("APP_ENV", "development")])).unwrap();
    assert_eq!(config.env, RuntimeEnv::Development);
    assert_eq!(config.insecure_defaults, vec!["JWT_SECRET", "ADMIN_PASSWORD"]);
}

#[test]
#[serial]
fn from_env_reads_the_process_environment() {
    let keys = ["APP_ENV", "JWT_SECRET", "ADMIN_PASSWORD", "PORT", "TRUSTED_PROXIES"];
    let saved: Vec<(&str, Option<String>)> = keys.iter().map(|k| (*k, std::env::var(k).ok())).collect();

    std::env::set_var("APP_ENV", "production");
    std::env::set_var("JWT_SECRET", "env-secret");
    std::env::set_var("ADMIN_PASSWORD", "env-password");
    std::env::set_var("PORT", "9090");
    std::env::set_var("TRUSTED_PROXIES", "10.0.0.1, 10.0.0.2");

    let config = AppConfig::from_env();

    for (key, value) in saved {
        match value {
            Some(v) => std::env::set_var(key, v),
            None => std::env::remove_var(key),
        }
    }

    let config = config.unwrap();
    assert_eq!(config.port, 9090);
    assert_eq!(config.jwt_secret, "env-secret");
    assert_eq!(config.trusted_proxies.len(), 2);
}

#[test]
fn invalid_numbers_are_config_errors() {
    let err = AppConfig::from_lookup(&lookup_from(&[
        ("APP_ENV", "development"),
        ("PORT", "eighty"),
    ]))
    .unwrap_err();
    assert!(err.to_string().contains("PORT"));
}

#[test]
#[serial]
fn env_file_supplies_missing_secrets_without_overriding_the_environment() {
    let keys = ["APP_ENV", "JWT_SECRET", "ADMIN_PASSWORD"];
    let saved: Vec<(&str, Option<String>)> = keys.iter().map(|k| (*k, std::env::var(k).ok())).collect();

    std::env::remove_var("APP_ENV");
    std::env::remove_var("JWT_SECRET");
    std::env::set_var("ADMIN_PASSWORD", "from-process");

    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "JWT_SECRET=from-file").unwrap();
    writeln!(file, "ADMIN_PASSWORD=also-from-file").unwrap();

    let loaded = load_env_file(file.path());
    let config = AppConfig::from_env();

    for (key, value) in saved {
        match value {
            Some(v) => std::env::set_var(key, v),
            None => std::env::remove_var(key),
        }
    }

    loaded.unwrap();
    let config = config.unwrap();
    assert_eq!(config.env, RuntimeEnv::Production);
    assert_eq!(config.jwt_secret, "from-file");
    assert_eq!(config.admin_password, "from-process");
}

#[test]
fn missing_env_file_is_a_config_error() {
    let err = load_env_file(std::path::Path::new("/nonexistent/feedback.env")).unwrap_err();
    assert!(err.to_string().contains("feedback.env"));
}
