use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use tracing::instrument;
use uuid::Uuid;

use realty_core::AppError;
use realty_models::{
    ListingFilter, ListingQuery, NewProperty, OwnerNumberResponse, PropertiesResponse,
    PropertyResponse,
};

use crate::metrics::track_listing_created;
use crate::middleware::auth::OptionalAuthUser;
use crate::modules::auth::controller::ErrorResponse;
use crate::state::AppState;
use crate::utils::listing_form::{ListingSubmission, cleanup_uploads};

use super::service::PropertyService;

/// Create a rental listing
///
/// Accepts the nested JSON document or `multipart/form-data` with flat
/// fields and up to `UPLOAD_MAX_IMAGES` files in `images`.
#[utoipa::path(
    post,
    path = "/api/properties/add",
    request_body = NewProperty,
    responses(
        (status = 201, description = "Property added successfully", body = PropertyResponse),
        (status = 400, description = "Validation error or unsupported file", body = ErrorResponse),
        (status = 401, description = "Token present but invalid", body = ErrorResponse),
        (status = 413, description = "File too large", body = ErrorResponse),
        (status = 502, description = "Image upload failed", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security((), ("bearer_auth" = [])),
    tag = "Properties"
)]
#[instrument(skip(state, auth_user, submission))]
pub async fn add_property(
    State(state): State<AppState>,
    auth_user: OptionalAuthUser,
    submission: ListingSubmission<NewProperty>,
) -> Result<(StatusCode, Json<PropertyResponse>), AppError> {
    let listed_by = auth_user.user_id()?;
    let storage = state.image_storage.as_ref();
    let (dto, file_ids) = submission.resolve(storage).await?;

    let property = match PropertyService::create_property(&state.db, dto, listed_by).await {
        Ok(property) => property,
        Err(e) => {
            cleanup_uploads(storage, &file_ids).await;
            return Err(e);
        }
    };
    track_listing_created("rent");

    Ok((
        StatusCode::CREATED,
        Json(PropertyResponse {
            success: true,
            message: Some("Property added successfully".to_string()),
            property,
        }),
    ))
}

/// List rental listings, optionally filtered
#[utoipa::path(
    get,
    path = "/api/properties/all",
    params(ListingQuery),
    responses(
        (status = 200, description = "Rental listings, newest first", body = PropertiesResponse),
        (status = 400, description = "Invalid price bound", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Properties"
)]
#[instrument(skip(state))]
pub async fn get_all_properties(
    State(state): State<AppState>,
    Query(query): Query<ListingQuery>,
) -> Result<Json<PropertiesResponse>, AppError> {
    let filter = ListingFilter::try_from(query)?;
    let message = if filter.is_empty() {
        "All properties fetched successfully"
    } else {
        "Filtered properties fetched successfully"
    };

    let properties = PropertyService::get_properties(&state.db, &filter).await?;
    Ok(Json(PropertiesResponse::new(
        Some(message.to_string()),
        properties,
    )))
}

#[utoipa::path(
    get,
    path = "/api/properties/search",
    params(ListingQuery),
    responses(
        (status = 200, description = "Matching rental listings", body = PropertiesResponse),
        (status = 400, description = "Invalid price bound", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Properties"
)]
#[instrument(skip(state))]
pub async fn search_properties(
    State(state): State<AppState>,
    Query(query): Query<ListingQuery>,
) -> Result<Json<PropertiesResponse>, AppError> {
    let filter = ListingFilter::try_from(query)?;
    let properties = PropertyService::get_properties(&state.db, &filter).await?;
    Ok(Json(PropertiesResponse::new(None, properties)))
}

#[utoipa::path(
    get,
    path = "/api/properties/{id}",
    params(("id" = Uuid, Path, description = "Property ID")),
    responses(
        (status = 200, description = "Rental listing", body = PropertyResponse),
        (status = 404, description = "Property not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Properties"
)]
#[instrument(skip(state))]
pub async fn get_property(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<PropertyResponse>, AppError> {
    let property = PropertyService::get_property(&state.db, id).await?;
    Ok(Json(PropertyResponse {
        success: true,
        message: None,
        property,
    }))
}

/// Contact number shown on rental listings
#[utoipa::path(
    get,
    path = "/api/properties/get_number",
    responses(
        (status = 200, description = "Owner contact number", body = OwnerNumberResponse)
    ),
    tag = "Properties"
)]
#[instrument(skip(state))]
pub async fn get_number(State(state): State<AppState>) -> Json<OwnerNumberResponse> {
    Json(OwnerNumberResponse {
        success: true,
        message: "Number of properties fetched successfully".to_string(),
        number: state.listing_config.owner_contact_number.clone(),
    })
}
