pub mod jwt;

pub use jwt::{mint_admin_token, verify_admin_token, AdminClaims};
