//! Error handling for the feedback backend.

pub mod error_code;

pub use error_code::ErrorCode;
