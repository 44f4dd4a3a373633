use axum::{Json, extract::State};
use tracing::instrument;

use realty_core::AppError;
use realty_models::{ContactRequest, MessageResponse};

use crate::modules::auth::controller::ErrorResponse;
use crate::state::AppState;
use crate::validator::ValidatedJson;

use super::service::ContactService;

/// Send a message to the team
#[utoipa::path(
    post,
    path = "/api/contact",
    request_body = ContactRequest,
    responses(
        (status = 200, description = "Message sent successfully", body = MessageResponse),
        (status = 400, description = "Bad request - validation error", body = ErrorResponse),
        (status = 404, description = "Property not found", body = ErrorResponse),
        (status = 500, description = "Team notification could not be sent", body = ErrorResponse)
    ),
    tag = "Contact"
)]
#[instrument(skip(state, dto))]
pub async fn send_contact_message(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<ContactRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    ContactService::send_message(&state.db, dto, &state.email_config).await?;
    Ok(Json(MessageResponse::new("Message sent successfully")))
}
