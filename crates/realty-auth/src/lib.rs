//! # Realty Auth
//!
//! Token utilities for the Realty API.
//!
//! - [`claims`]: JWT claim structure for access tokens
//! - [`jwt`]: Access token creation and verification
//! - [`reset`]: Single-use password reset tokens
//!
//! Access tokens carry a unique `jti` so that a token can be revoked at
//! logout before it expires. The revocation list itself lives in the
//! database and is checked by the API's auth extractor.
//!
//! # Example
//!
//! ```ignore
//! use realty_auth::{create_access_token, verify_token};
//! use realty_config::JwtConfig;
//!
//! let config = JwtConfig::from_env();
//! let token = create_access_token(user_id, &config)?;
//! let claims = verify_token(&token, &config)?;
//! assert_eq!(claims.user_id()?, user_id);
//! ```

pub mod claims;
pub mod jwt;
pub mod reset;

// Re-export commonly used types at crate root
pub use claims::Claims;
pub use jwt::{create_access_token, verify_token};
pub use reset::{generate_reset_token, hash_reset_token};
