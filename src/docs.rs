use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use realty_models::{
    Booking, BookingHistoryItem, BookingHistoryResponse, BookingResponse, ContactInfo,
    ContactRequest, CreateBookingRequest, CreateSalePropertyResponse, FloorPlan,
    ForgotPasswordRequest, GetByIdsRequest, ImageRef, Location, LoginRequest, LoginResponse,
    MessageResponse, NearbyPlace, NewProperty, NewSaleProperty, OwnerNumberResponse,
    ProfileResponse, PropertiesResponse, Property, PropertyResponse, RegisterRequest,
    RegisterResponse, ResetPasswordRequest, SalePropertiesResponse, SaleProperty,
    SalePropertyResponse, UpdateUserRequest, UpdateUserResponse, UpdatedUser, User,
    UserListingsResponse, UserSummary, WhatsNearby,
};
use realty_models::properties::RentalDetails;
use realty_models::sales::SaleDetails;

use crate::modules::auth::controller::ErrorResponse;
use crate::router::HealthResponse;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::router::health,
        crate::modules::auth::controller::login_user,
        crate::modules::auth::controller::logout_user,
        crate::modules::auth::controller::forgot_password,
        crate::modules::auth::controller::reset_password,
        crate::modules::users::controller::register_user,
        crate::modules::users::controller::update_user,
        crate::modules::users::controller::delete_user,
        crate::modules::users::controller::get_profile,
        crate::modules::users::controller::get_user_listings,
        crate::modules::bookings::controller::book_property,
        crate::modules::bookings::controller::get_booking_history,
        crate::modules::properties::controller::add_property,
        crate::modules::properties::controller::get_all_properties,
        crate::modules::properties::controller::search_properties,
        crate::modules::properties::controller::get_property,
        crate::modules::properties::controller::get_number,
        crate::modules::sales::controller::add_sale_property,
        crate::modules::sales::controller::get_all_sale_properties,
        crate::modules::sales::controller::search_sale_properties,
        crate::modules::sales::controller::get_sale_property,
        crate::modules::sales::controller::get_number,
        crate::modules::sales::controller::get_sale_properties_by_ids,
        crate::modules::contact::controller::send_contact_message,
    ),
    components(
        schemas(
            ErrorResponse,
            HealthResponse,
            MessageResponse,
            LoginRequest,
            LoginResponse,
            ForgotPasswordRequest,
            ResetPasswordRequest,
            User,
            UserSummary,
            RegisterRequest,
            RegisterResponse,
            UpdateUserRequest,
            UpdatedUser,
            UpdateUserResponse,
            ProfileResponse,
            UserListingsResponse,
            ImageRef,
            Location,
            ContactInfo,
            NearbyPlace,
            WhatsNearby,
            OwnerNumberResponse,
            RentalDetails,
            NewProperty,
            Property,
            PropertyResponse,
            PropertiesResponse,
            SaleDetails,
            FloorPlan,
            NewSaleProperty,
            SaleProperty,
            CreateSalePropertyResponse,
            SalePropertyResponse,
            SalePropertiesResponse,
            GetByIdsRequest,
            CreateBookingRequest,
            Booking,
            BookingHistoryItem,
            BookingResponse,
            BookingHistoryResponse,
            ContactRequest,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Liveness check"),
        (name = "Authentication", description = "Login, logout and password reset"),
        (name = "Users", description = "Account management"),
        (name = "Properties", description = "Rental listings"),
        (name = "Sale Properties", description = "Sale listings"),
        (name = "Bookings", description = "Site visit requests"),
        (name = "Contact", description = "Contact form")
    ),
    info(
        title = "Realty API",
        version = "0.1.0",
        description = "Rental and sale listings with JWT authentication, image uploads and email notifications.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
