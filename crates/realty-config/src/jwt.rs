use std::env;
use std::fmt;

use crate::parse_env;

#[derive(Clone)]
pub struct JwtConfig {
    pub secret: String,
    /// Access token lifetime in seconds.
    pub access_token_expiry: i64,
    /// Password reset token lifetime in seconds.
    pub reset_token_expiry: i64,
}

impl JwtConfig {
    pub fn from_env() -> Self {
        Self {
            secret: env::var("JWT_SECRET")
                .unwrap_or_else(|_| "your-secret-key-change-in-production".to_string()),
            access_token_expiry: parse_env("JWT_ACCESS_EXPIRY", 3600), // 1 hour
            reset_token_expiry: parse_env("RESET_TOKEN_EXPIRY", 3600),
        }
    }
}

impl fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"[redacted]")
            .field("access_token_expiry", &self.access_token_expiry)
            .field("reset_token_expiry", &self.reset_token_expiry)
            .finish()
    }
}
