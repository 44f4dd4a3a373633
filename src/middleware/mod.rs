//! Request extractors for authentication.
//!
//! # Authentication Flow
//!
//! 1. Client sends `Authorization: Bearer <token>` (the prefix is optional)
//! 2. [`auth::AuthUser`] verifies the JWT signature and expiry
//! 3. The token id is checked against the revocation list
//! 4. Handler executes with the caller's claims
//!
//! # Example
//!
//! ```ignore
//! use crate::middleware::auth::{AuthUser, OptionalAuthUser};
//!
//! async fn get_profile(auth_user: AuthUser) -> impl IntoResponse {
//!     let user_id = auth_user.user_id()?;
//!     // ...
//! }
//!
//! async fn add_listing(OptionalAuthUser(caller): OptionalAuthUser) -> impl IntoResponse {
//!     // `caller` is None for anonymous submissions
//! }
//! ```

pub mod auth;
