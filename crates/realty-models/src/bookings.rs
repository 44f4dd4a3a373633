//! Site visit bookings.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    #[schema(value_type = String, format = Date, example = "2026-11-02")]
    pub visit_date: NaiveDate,
    #[serde(default)]
    #[validate(length(max = 2000, message = "Message must be at most 2000 characters"))]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: Uuid,
    pub user_id: Uuid,
    pub property_id: Uuid,
    pub visit_date: NaiveDate,
    pub message: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A booking joined with a short summary of the booked property.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookingHistoryItem {
    pub id: Uuid,
    pub property_id: Uuid,
    pub property_title: String,
    pub city: String,
    pub locality: String,
    pub visit_date: NaiveDate,
    pub message: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BookingResponse {
    pub success: bool,
    pub message: String,
    pub booking: Booking,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookingHistoryResponse {
    pub success: bool,
    pub booking_history: Vec<BookingHistoryItem>,
}
