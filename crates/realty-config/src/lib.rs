//! # Realty Config
//!
//! Configuration types for the Realty API.
//!
//! Each struct is loaded from environment variables with sensible defaults
//! for local development:
//!
//! - [`server`]: Bind address
//! - [`jwt`]: JWT signing and token lifetimes
//! - [`cors`]: CORS (Cross-Origin Resource Sharing) configuration
//! - [`email`]: SMTP settings and sender identity
//! - [`imagekit`]: Credentials and endpoints for the image CDN
//! - [`upload`]: Limits for multipart listing uploads
//! - [`listing`]: Listing-wide settings such as the public owner number
//!
//! # Example
//!
//! ```ignore
//! use realty_config::{JwtConfig, CorsConfig, EmailConfig};
//!
//! let jwt_config = JwtConfig::from_env();
//! let cors_config = CorsConfig::from_env();
//! let email_config = EmailConfig::from_env();
//! ```

pub mod cors;
pub mod email;
pub mod imagekit;
pub mod jwt;
pub mod listing;
pub mod server;
pub mod upload;

// Re-export commonly used types at crate root
pub use cors::CorsConfig;
pub use email::EmailConfig;
pub use imagekit::ImageKitConfig;
pub use jwt::JwtConfig;
pub use listing::ListingConfig;
pub use server::ServerConfig;
pub use upload::UploadConfig;

/// Reads and parses an environment variable, falling back to `default`
/// when it is unset or does not parse.
pub(crate) fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

pub(crate) fn flag_env(key: &str, default: bool) -> bool {
    std::env::var(key)
        .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
        .unwrap_or(default)
}
