use std::time::Duration;

use jsonwebtoken::Algorithm;

/// Admin tokens live for 24 hours.
pub const ADMIN_TOKEN_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Trust anchors for the admin surface: token signing key and password digest.
#[derive(Clone)]
pub struct SecurityConfig {
    /// JWT secret key for signing and verifying tokens
    pub jwt_secret: Vec<u8>,
    /// JWT algorithm to use (defaults to HS256)
    pub algorithm: Algorithm,
    /// Lifetime of issued admin tokens
    pub token_ttl: Duration,
    /// blake3 digest of the admin password; the plaintext is not kept
    admin_password_digest: blake3::Hash,
}

impl SecurityConfig {
    pub fn new(jwt_secret: impl Into<Vec<u8>>, admin_password: &str) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            algorithm: Algorithm::HS256,
            token_ttl: ADMIN_TOKEN_TTL,
            admin_password_digest: blake3::hash(admin_password.as_bytes()),
        }
    }

    /// Constant-time comparison against the configured admin password.
    pub fn admin_password_matches(&self, candidate: &str) -> bool {
        // blake3::Hash equality is constant-time
        blake3::hash(candidate.as_bytes()) == self.admin_password_digest
    }

    /// Fixed test configuration (secret and password are not random so tokens
    /// can be minted independently in tests).
    pub fn for_tests() -> Self {
        Self::new(
            b"test_secret_key_for_testing_purposes_only".to_vec(),
            "test-admin-password",
        )
    }
}

impl std::fmt::Debug for SecurityConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecurityConfig")
            .field("jwt_secret", &"<redacted>")
            .field("algorithm", &self.algorithm)
            .field("token_ttl", &self.token_ttl)
            .finish_non_exhaustive()
    }
}
