//! Helpers shared by unit and integration tests: in-memory stores, prepared
//! states and the test service builder.
//!
//! Functions here panic on setup failure; they are only meant for tests.

pub mod app_builder;
pub mod db;
pub mod state_builder;

use std::time::SystemTime;

use crate::auth::mint_admin_token;
use crate::state::security_config::SecurityConfig;

pub use app_builder::create_test_app;
pub use db::{memory_db, migrated_memory_db};
pub use state_builder::{create_test_state, TestStateBuilder};

/// Mint a valid admin token for `security`.
pub fn admin_token(security: &SecurityConfig) -> String {
    mint_admin_token(SystemTime::now(), security).expect("mint admin token")
}

/// `Authorization` header value carrying a valid admin token.
pub fn bearer(security: &SecurityConfig) -> String {
    format!("Bearer {}", admin_token(security))
}
