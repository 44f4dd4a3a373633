use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use tracing::{instrument, warn};
use uuid::Uuid;

use realty_core::AppError;
use realty_models::{BookingHistoryResponse, BookingResponse, CreateBookingRequest};

use crate::middleware::auth::AuthUser;
use crate::modules::auth::controller::ErrorResponse;
use crate::modules::properties::service::PropertyService;
use crate::modules::users::service::UserService;
use crate::state::AppState;
use crate::utils::email::{BookingEmail, EmailService};
use crate::validator::ValidatedJson;

use super::service::BookingService;

/// Request a site visit for a rental listing
#[utoipa::path(
    post,
    path = "/api/properties/{id}/book",
    params(("id" = Uuid, Path, description = "Property ID")),
    request_body = CreateBookingRequest,
    responses(
        (status = 201, description = "Booking request sent successfully", body = BookingResponse),
        (status = 400, description = "Invalid visit date", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Property not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Bookings"
)]
#[instrument(skip(state, auth_user, dto))]
pub async fn book_property(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<CreateBookingRequest>,
) -> Result<(StatusCode, Json<BookingResponse>), AppError> {
    let user_id = auth_user.user_id()?;
    let property = PropertyService::get_property(&state.db, id).await?;
    let user = UserService::get_user(&state.db, user_id).await?;

    let booking = BookingService::create_booking(&state.db, user_id, property.id, dto).await?;

    let location = format!("{}, {}", property.location.locality, property.location.city);
    let details = BookingEmail {
        property_title: &property.basic_details.title,
        property_location: &location,
        visit_date: booking.visit_date,
        user_name: &user.fullname,
        user_email: &user.email,
        user_phone: &user.phone,
        message: booking.message.as_deref(),
    };

    let email_service = EmailService::new(state.email_config.clone());
    if let Err(e) = email_service
        .send_booking_notification(&property.contact_info.email, &details)
        .await
    {
        warn!(booking_id = %booking.id, error = %e.error, "Failed to send booking notification");
    }
    if let Err(e) = email_service.send_booking_confirmation(&details).await {
        warn!(booking_id = %booking.id, error = %e.error, "Failed to send booking confirmation");
    }

    Ok((
        StatusCode::CREATED,
        Json(BookingResponse {
            success: true,
            message: "Booking request sent successfully".to_string(),
            booking,
        }),
    ))
}

/// The caller's site visit requests
#[utoipa::path(
    get,
    path = "/api/user/bookings",
    responses(
        (status = 200, description = "Booking history, newest first", body = BookingHistoryResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Bookings"
)]
#[instrument(skip(state, auth_user))]
pub async fn get_booking_history(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<BookingHistoryResponse>, AppError> {
    let user_id = auth_user.user_id()?;
    let booking_history = BookingService::get_booking_history(&state.db, user_id).await?;

    Ok(Json(BookingHistoryResponse {
        success: true,
        booking_history,
    }))
}
