//! Authentication DTOs: login, logout and password reset.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::users::UserSummary;

/// Login with phone number and password.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[schema(example = "9876543210")]
    pub phone: Option<String>,
    #[schema(example = "password123")]
    pub password: Option<String>,
}

impl LoginRequest {
    /// Returns `(phone, password)` when both are present and non-blank.
    pub fn credentials(&self) -> Option<(&str, &str)> {
        let phone = self.phone.as_deref().map(str::trim).filter(|p| !p.is_empty())?;
        let password = self.password.as_deref().filter(|p| !p.is_empty())?;
        Some((phone, password))
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LoginResponse {
    pub success: bool,
    pub message: String,
    pub token: String,
    pub user: UserSummary,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct ForgotPasswordRequest {
    #[validate(email(message = "Invalid email address"))]
    #[schema(example = "asha@example.com")]
    pub email: String,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    #[validate(length(min = 1, message = "Reset token is required"))]
    pub token: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub new_password: String,
}

/// Generic `{success, message}` envelope.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}
