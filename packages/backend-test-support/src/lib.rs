//! Backend test support utilities
//!
//! Logging initialization and error-body assertions shared by the backend's
//! integration tests. Nothing here depends on backend types.

pub mod error_body;
pub mod logging;
