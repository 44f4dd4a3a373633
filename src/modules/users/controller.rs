use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use tracing::instrument;
use uuid::Uuid;

use realty_core::AppError;
use realty_models::{
    MessageResponse, ProfileResponse, RegisterRequest, RegisterResponse, UpdateUserRequest,
    UpdateUserResponse, UpdatedUser, UserListingsResponse,
};

use crate::middleware::auth::AuthUser;
use crate::modules::auth::controller::ErrorResponse;
use crate::modules::properties::service::PropertyService;
use crate::modules::sales::service::SaleService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

use super::service::UserService;

/// Register a new user
#[utoipa::path(
    post,
    path = "/api/user/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered successfully", body = RegisterResponse),
        (status = 400, description = "Missing fields or user already exists", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Users"
)]
#[instrument(skip(state, dto))]
pub async fn register_user(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), AppError> {
    let user = UserService::register_user(&state.db, dto, &state.email_config).await?;
    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            success: true,
            message: "User registered successfully".to_string(),
            user,
        }),
    ))
}

#[utoipa::path(
    put,
    path = "/api/user/update/{id}",
    params(("id" = Uuid, Path, description = "User ID")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User updated successfully", body = UpdateUserResponse),
        (status = 400, description = "Validation error or email/phone in use", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Not the caller's account", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip(state, auth_user, dto))]
pub async fn update_user(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateUserRequest>,
) -> Result<Json<UpdateUserResponse>, AppError> {
    auth_user.ensure_self(id)?;

    let user = UserService::update_user(&state.db, id, dto).await?;
    Ok(Json(UpdateUserResponse {
        success: true,
        message: "User updated successfully".to_string(),
        user: UpdatedUser::from(user),
    }))
}

#[utoipa::path(
    delete,
    path = "/api/user/delete/{id}",
    params(("id" = Uuid, Path, description = "User ID")),
    responses(
        (status = 200, description = "User deleted successfully", body = MessageResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Not the caller's account", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip(state, auth_user))]
pub async fn delete_user(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, AppError> {
    auth_user.ensure_self(id)?;

    UserService::delete_user(&state.db, id).await?;
    Ok(Json(MessageResponse::new("User deleted successfully")))
}

#[utoipa::path(
    get,
    path = "/api/user/profile",
    responses(
        (status = 200, description = "User profile retrieved successfully", body = ProfileResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip(state, auth_user))]
pub async fn get_profile(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<ProfileResponse>, AppError> {
    let user = UserService::get_user(&state.db, auth_user.user_id()?).await?;
    Ok(Json(ProfileResponse {
        success: true,
        message: "User profile retrieved successfully".to_string(),
        user,
    }))
}

/// Rental and sale listings created by the caller
#[utoipa::path(
    get,
    path = "/api/user/listings",
    responses(
        (status = 200, description = "The caller's listings", body = UserListingsResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip(state, auth_user))]
pub async fn get_user_listings(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<UserListingsResponse>, AppError> {
    let user_id = auth_user.user_id()?;

    let my_properties = PropertyService::get_properties_by_owner(&state.db, user_id).await?;
    let my_sell_properties = SaleService::get_sale_properties_by_owner(&state.db, user_id).await?;

    Ok(Json(UserListingsResponse {
        success: true,
        my_properties,
        my_sell_properties,
    }))
}
