pub mod app_state;
pub mod db_status;
pub mod security_config;

pub use app_state::AppState;
pub use db_status::DbStatus;
pub use security_config::SecurityConfig;
