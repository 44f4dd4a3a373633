use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use tracing::instrument;
use uuid::Uuid;

use realty_core::AppError;
use realty_models::{
    CreateSalePropertyResponse, GetByIdsRequest, ListingFilter, ListingQuery, NewSaleProperty,
    OwnerNumberResponse, SalePropertiesResponse, SalePropertyResponse,
};

use crate::metrics::track_listing_created;
use crate::middleware::auth::AuthUser;
use crate::modules::auth::controller::ErrorResponse;
use crate::state::AppState;
use crate::utils::listing_form::{ListingSubmission, cleanup_uploads};
use crate::validator::ValidatedJson;

use super::service::SaleService;

/// Create a sale listing
///
/// Accepts the nested JSON document or `multipart/form-data` with flat
/// fields, image files in `images` and one `virtualTour` file.
#[utoipa::path(
    post,
    path = "/api/sale/add",
    request_body = NewSaleProperty,
    responses(
        (status = 201, description = "Sale property added successfully", body = CreateSalePropertyResponse),
        (status = 400, description = "Validation error or unsupported file", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 413, description = "File too large", body = ErrorResponse),
        (status = 502, description = "Image upload failed", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Sale Properties"
)]
#[instrument(skip(state, auth_user, submission))]
pub async fn add_sale_property(
    State(state): State<AppState>,
    auth_user: AuthUser,
    submission: ListingSubmission<NewSaleProperty>,
) -> Result<(StatusCode, Json<CreateSalePropertyResponse>), AppError> {
    let listed_by = auth_user.user_id()?;
    let storage = state.image_storage.as_ref();
    let (dto, file_ids) = submission.resolve(storage).await?;

    let property = match SaleService::create_sale_property(&state.db, dto, listed_by).await {
        Ok(property) => property,
        Err(e) => {
            cleanup_uploads(storage, &file_ids).await;
            return Err(e);
        }
    };
    track_listing_created("sale");

    Ok((
        StatusCode::CREATED,
        Json(CreateSalePropertyResponse {
            success: true,
            message: "Sale property added successfully".to_string(),
            property,
        }),
    ))
}

#[utoipa::path(
    get,
    path = "/api/sale/all",
    params(ListingQuery),
    responses(
        (status = 200, description = "Sale listings, newest first", body = SalePropertiesResponse),
        (status = 400, description = "Invalid price bound", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Sale Properties"
)]
#[instrument(skip(state))]
pub async fn get_all_sale_properties(
    State(state): State<AppState>,
    Query(query): Query<ListingQuery>,
) -> Result<Json<SalePropertiesResponse>, AppError> {
    let filter = ListingFilter::try_from(query)?;
    let message = if filter.is_empty() {
        "All sale properties fetched successfully"
    } else {
        "Filtered sale properties fetched successfully"
    };

    let properties = SaleService::get_sale_properties(&state.db, &filter).await?;
    Ok(Json(SalePropertiesResponse::new(
        Some(message.to_string()),
        properties,
    )))
}

#[utoipa::path(
    get,
    path = "/api/sale/search",
    params(ListingQuery),
    responses(
        (status = 200, description = "Matching sale listings", body = SalePropertiesResponse),
        (status = 400, description = "Invalid price bound", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Sale Properties"
)]
#[instrument(skip(state, _auth_user))]
pub async fn search_sale_properties(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Query(query): Query<ListingQuery>,
) -> Result<Json<SalePropertiesResponse>, AppError> {
    let filter = ListingFilter::try_from(query)?;
    let properties = SaleService::get_sale_properties(&state.db, &filter).await?;
    Ok(Json(SalePropertiesResponse::new(None, properties)))
}

#[utoipa::path(
    get,
    path = "/api/sale/{id}",
    params(("id" = Uuid, Path, description = "Sale property ID")),
    responses(
        (status = 200, description = "Sale listing", body = SalePropertyResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Sale Property not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Sale Properties"
)]
#[instrument(skip(state, _auth_user))]
pub async fn get_sale_property(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<SalePropertyResponse>, AppError> {
    let sale_property = SaleService::get_sale_property(&state.db, id).await?;
    Ok(Json(SalePropertyResponse {
        success: true,
        sale_property,
    }))
}

/// Contact number shown on sale listings
#[utoipa::path(
    get,
    path = "/api/sale/get_number",
    operation_id = "get_sale_number",
    responses(
        (status = 200, description = "Owner contact number", body = OwnerNumberResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Sale Properties"
)]
#[instrument(skip(state, _auth_user))]
pub async fn get_number(
    State(state): State<AppState>,
    _auth_user: AuthUser,
) -> Json<OwnerNumberResponse> {
    Json(OwnerNumberResponse {
        success: true,
        message: "Owner Number fetched successfully".to_string(),
        number: state.listing_config.owner_contact_number.clone(),
    })
}

/// Fetch several sale listings in the order requested
#[utoipa::path(
    post,
    path = "/api/sale/getbyids",
    request_body = GetByIdsRequest,
    responses(
        (status = 200, description = "Listings found for the given ids", body = SalePropertiesResponse),
        (status = 400, description = "Between 1 and 100 ids are required", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Sale Properties"
)]
#[instrument(skip(state, _auth_user, dto), fields(count = dto.ids.len()))]
pub async fn get_sale_properties_by_ids(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<GetByIdsRequest>,
) -> Result<Json<SalePropertiesResponse>, AppError> {
    let properties = SaleService::get_sale_properties_by_ids(&state.db, &dto.ids).await?;
    Ok(Json(SalePropertiesResponse::new(None, properties)))
}
