//! Contact form DTO.

use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::listing::not_blank;

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContactRequest {
    #[validate(
        custom(function = "not_blank", message = "Name is required"),
        length(max = 200, message = "Name must be at most 200 characters")
    )]
    #[schema(example = "Asha Verma")]
    pub name: String,
    #[validate(email(message = "Invalid email address"))]
    #[schema(example = "asha@example.com")]
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    #[validate(length(max = 200, message = "Subject must be at most 200 characters"))]
    pub subject: Option<String>,
    #[validate(length(min = 1, max = 5000, message = "Message must be between 1 and 5000 characters"))]
    pub message: String,
    /// Rental listing the enquiry is about.
    #[serde(default)]
    pub property_id: Option<Uuid>,
}

impl ContactRequest {
    pub fn subject_or_default(&self) -> &str {
        self.subject
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or("New enquiry")
    }
}
