//! User domain models and DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::listing::not_blank;
use crate::properties::Property;
use crate::sales::SaleProperty;

/// A registered user. The password hash is never selected into this type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub fullname: String,
    pub email: String,
    pub phone: String,
    pub is_subscribed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Public subset of a user returned by register and login.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserSummary {
    pub id: Uuid,
    pub fullname: String,
    pub email: String,
    pub phone: String,
}

impl From<User> for UserSummary {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            fullname: user.fullname,
            email: user.email,
            phone: user.phone,
        }
    }
}

/// Registration request. Presence of every field is checked first so a
/// single message can be returned when any of them is missing; the field
/// rules live on [`NewUser`].
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    #[schema(example = "Asha Verma")]
    pub fullname: Option<String>,
    #[schema(example = "asha@example.com")]
    pub email: Option<String>,
    #[schema(example = "9876543210")]
    pub phone: Option<String>,
    #[schema(example = "password123")]
    pub password: Option<String>,
}

/// Fields of a [`RegisterRequest`] once all of them are known to be present.
#[derive(Debug, Clone, Validate)]
pub struct NewUser {
    pub fullname: String,
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[validate(length(min = 7, max = 20, message = "Phone must be between 7 and 20 characters"))]
    pub phone: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
}

impl RegisterRequest {
    /// Returns the trimmed fields, or `None` when any is missing or blank.
    pub fn into_new_user(self) -> Option<NewUser> {
        fn present(value: Option<String>) -> Option<String> {
            value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
        }

        Some(NewUser {
            fullname: present(self.fullname)?,
            email: present(self.email)?.to_lowercase(),
            phone: present(self.phone)?,
            password: self.password.filter(|p| !p.is_empty())?,
        })
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RegisterResponse {
    pub success: bool,
    pub message: String,
    pub user: UserSummary,
}

/// Partial update of the caller's own account.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    #[validate(custom(function = "not_blank", message = "Full name cannot be empty"))]
    pub fullname: Option<String>,
    #[validate(email(message = "Invalid email address"))]
    pub email: Option<String>,
    #[validate(length(min = 7, max = 20, message = "Phone must be between 7 and 20 characters"))]
    pub phone: Option<String>,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: Option<String>,
    pub is_subscribed: Option<bool>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdatedUser {
    pub id: Uuid,
    pub fullname: String,
    pub email: String,
    pub phone: String,
    pub is_subscribed: bool,
}

impl From<User> for UpdatedUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            fullname: user.fullname,
            email: user.email,
            phone: user.phone,
            is_subscribed: user.is_subscribed,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UpdateUserResponse {
    pub success: bool,
    pub message: String,
    pub user: UpdatedUser,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProfileResponse {
    pub success: bool,
    pub message: String,
    pub user: User,
}

/// Listings created by the caller.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserListingsResponse {
    pub success: bool,
    pub my_properties: Vec<Property>,
    pub my_sell_properties: Vec<SaleProperty>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(fullname: &str, email: &str, phone: &str, password: &str) -> RegisterRequest {
        RegisterRequest {
            fullname: Some(fullname.to_string()),
            email: Some(email.to_string()),
            phone: Some(phone.to_string()),
            password: Some(password.to_string()),
        }
    }

    #[test]
    fn complete_request_is_normalised() {
        let user = request(" Asha ", "Asha@Example.com", " 9876543210 ", "password123")
            .into_new_user()
            .unwrap();
        assert_eq!(user.fullname, "Asha");
        assert_eq!(user.email, "asha@example.com");
        assert_eq!(user.phone, "9876543210");
    }

    #[test]
    fn blank_field_counts_as_missing() {
        assert!(request("Asha", "asha@example.com", "   ", "password123")
            .into_new_user()
            .is_none());

        let missing = RegisterRequest {
            fullname: None,
            ..request("x", "asha@example.com", "9876543210", "password123")
        };
        assert!(missing.into_new_user().is_none());
    }

    #[test]
    fn short_password_fails_validation() {
        let short = request("Asha", "asha@example.com", "9876543210", "short")
            .into_new_user()
            .unwrap();
        assert!(short.validate().is_err());

        let ok = request("Asha", "asha@example.com", "9876543210", "long-enough")
            .into_new_user()
            .unwrap();
        assert!(ok.validate().is_ok());
    }

    #[test]
    fn blank_fullname_update_fails_validation() {
        let update = UpdateUserRequest {
            fullname: Some("   ".to_string()),
            ..Default::default()
        };
        let errors = update.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("fullname"));

        let update = UpdateUserRequest {
            fullname: Some(" Asha ".to_string()),
            ..Default::default()
        };
        assert!(update.validate().is_ok());
        assert!(UpdateUserRequest::default().validate().is_ok());
    }
}
