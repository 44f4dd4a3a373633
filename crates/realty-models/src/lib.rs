//! # Realty Models
//!
//! Domain models and DTOs for the Realty API.
//!
//! # Modules
//!
//! - [`auth`]: Login, logout and password reset DTOs
//! - [`bookings`]: Site visit bookings
//! - [`contact`]: Contact form
//! - [`form`]: Flat multipart listing submissions
//! - [`listing`]: Types shared by rental and sale listings
//! - [`properties`]: Rental listings
//! - [`sales`]: Sale listings
//! - [`users`]: User models
//!
//! # Example
//!
//! ```ignore
//! use realty_models::properties::NewProperty;
//! use validator::Validate;
//!
//! let property: NewProperty = serde_json::from_str(body)?;
//! property.validate()?;
//! ```

pub mod auth;
pub mod bookings;
pub mod contact;
pub mod form;
pub mod listing;
pub mod properties;
pub mod sales;
pub mod users;

pub use auth::{
    ForgotPasswordRequest, LoginRequest, LoginResponse, MessageResponse, ResetPasswordRequest,
};

pub use bookings::{
    Booking, BookingHistoryItem, BookingHistoryResponse, BookingResponse, CreateBookingRequest,
};

pub use contact::ContactRequest;

pub use form::{FormFields, FormUploads, FromListingForm};

pub use listing::{
    ContactInfo, ImageRef, ListingFilter, ListingQuery, ListingType, Location, NearbyPlace,
    OwnerNumberResponse, PriceField, PropertyType, WhatsNearby,
};

pub use properties::{NewProperty, PropertiesResponse, Property, PropertyResponse, PropertyRow};

pub use sales::{
    CreateSalePropertyResponse, FloorPlan, GetByIdsRequest, NewSaleProperty,
    SalePropertiesResponse, SaleProperty, SalePropertyResponse, SalePropertyRow,
};

pub use users::{
    NewUser, ProfileResponse, RegisterRequest, RegisterResponse, UpdateUserRequest,
    UpdateUserResponse, UpdatedUser, User, UserListingsResponse, UserSummary,
};
