//! Rental listing models and DTOs.

use chrono::{DateTime, Utc};
use realty_core::AppError;
use realty_core::serde::string_or_seq;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use sqlx::types::Json;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::form::{FormFields, FormUploads, FromListingForm};
use crate::listing::{
    ContactInfo, ImageRef, ListingType, Location, PropertyType, WhatsNearby, deserialize_images,
    schema_error,
};

const BASIC: &str = "basicDetails";
const LOCATION: &str = "location";
const CONTACT: &str = "contactInfo";

/// Rental terms and size of a property.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RentalDetails {
    #[serde(default)]
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    /// Built-up area in sq ft.
    #[validate(
        required(message = "Area is required"),
        range(exclusive_min = 0.0, message = "Area must be greater than zero")
    )]
    pub area: Option<f64>,
    #[schema(example = "2BHK")]
    pub bhk_type: Option<String>,
    pub bathrooms: Option<u32>,
    pub furnishing_status: Option<String>,
    pub property_facing: Option<String>,
    pub property_age: Option<String>,
    #[validate(range(min = 0, message = "Monthly rent cannot be negative"))]
    pub monthly_rent: Option<i64>,
    #[validate(range(min = 0, message = "Security deposit cannot be negative"))]
    pub security_deposit: Option<i64>,
    #[validate(range(min = 0, message = "Maintenance charges cannot be negative"))]
    pub maintenance_charges: Option<i64>,
    #[serde(default, deserialize_with = "string_or_seq")]
    pub amenities: Vec<String>,
}

/// Request body for creating a rental listing.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_rental"))]
pub struct NewProperty {
    #[schema(value_type = String, example = "Apartment")]
    pub property_type: PropertyType,
    #[schema(value_type = String, example = "For Rent")]
    pub listing_type: ListingType,
    #[validate(nested)]
    pub basic_details: RentalDetails,
    #[validate(nested)]
    pub location: Location,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "deserialize_images")]
    #[validate(nested)]
    pub images: Vec<ImageRef>,
    #[serde(default)]
    #[validate(nested)]
    pub whats_nearby: WhatsNearby,
    #[validate(nested)]
    pub contact_info: ContactInfo,
}

fn validate_rental(property: &NewProperty) -> Result<(), ValidationError> {
    if !property.property_type.is_rentable() {
        return Err(schema_error(
            "property_type",
            format!("{} cannot be listed for rent", property.property_type),
        ));
    }

    if property.listing_type != ListingType::ForRent {
        return Err(schema_error(
            "listing_type",
            "Rental listings must use listingType \"For Rent\"".to_string(),
        ));
    }

    let has_owner = property
        .contact_info
        .owner
        .as_deref()
        .is_some_and(|owner| !owner.trim().is_empty());
    if !has_owner {
        return Err(schema_error("owner", "Owner name is required".to_string()));
    }

    Ok(())
}

impl FromListingForm for NewProperty {
    fn from_form(fields: &FormFields, uploads: FormUploads) -> Result<Self, AppError> {
        let mut images = uploads.images;
        images.extend(fields.image_urls());

        Ok(Self {
            property_type: fields.parse_required("propertyType")?,
            listing_type: fields.parse_required("listingType")?,
            basic_details: RentalDetails {
                title: fields.lookup_string(BASIC, "title").unwrap_or_default(),
                area: fields.lookup_number(BASIC, "area")?,
                bhk_type: fields.lookup_string(BASIC, "bhkType"),
                bathrooms: fields.lookup_number(BASIC, "bathrooms")?,
                furnishing_status: fields.lookup_string(BASIC, "furnishingStatus"),
                property_facing: fields.lookup_string(BASIC, "propertyFacing"),
                property_age: fields.lookup_string(BASIC, "propertyAge"),
                monthly_rent: fields.lookup_number(BASIC, "monthlyRent")?,
                security_deposit: fields.lookup_number(BASIC, "securityDeposit")?,
                maintenance_charges: fields.lookup_number(BASIC, "maintenanceCharges")?,
                amenities: fields.lookup_all(BASIC, "amenities"),
            },
            location: Location {
                city: fields.lookup_string(LOCATION, "city").unwrap_or_default(),
                locality: fields.lookup_string(LOCATION, "locality").unwrap_or_default(),
                landmark: None,
                full_address: fields.lookup_string(LOCATION, "fullAddress"),
                pincode: None,
            },
            description: fields.get("description").map(str::to_string),
            images,
            whats_nearby: fields.whats_nearby(&["education", "health", "food", "culture"])?,
            contact_info: ContactInfo {
                advisor: None,
                owner: fields.lookup_string(CONTACT, "owner"),
                phone: fields.lookup_string(CONTACT, "phone").unwrap_or_default(),
                email: fields.lookup_string(CONTACT, "email").unwrap_or_default(),
            },
        })
    }
}

/// Database row for a rental listing.
#[derive(Debug, FromRow)]
pub struct PropertyRow {
    pub id: Uuid,
    pub property_type: String,
    pub listing_type: String,
    pub basic_details: Json<RentalDetails>,
    pub location: Json<Location>,
    pub description: Option<String>,
    pub images: Json<Vec<ImageRef>>,
    pub whats_nearby: Json<WhatsNearby>,
    pub contact_info: Json<ContactInfo>,
    pub listed_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A rental listing.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    pub id: Uuid,
    #[schema(value_type = String, example = "Apartment")]
    pub property_type: PropertyType,
    #[schema(value_type = String, example = "For Rent")]
    pub listing_type: ListingType,
    pub basic_details: RentalDetails,
    pub location: Location,
    pub description: Option<String>,
    pub images: Vec<ImageRef>,
    pub whats_nearby: WhatsNearby,
    pub contact_info: ContactInfo,
    pub listed_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<PropertyRow> for Property {
    type Error = AppError;

    fn try_from(row: PropertyRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            property_type: row.property_type.parse().map_err(AppError::internal_error)?,
            listing_type: row.listing_type.parse().map_err(AppError::internal_error)?,
            basic_details: row.basic_details.0,
            location: row.location.0,
            description: row.description,
            images: row.images.0,
            whats_nearby: row.whats_nearby.0,
            contact_info: row.contact_info.0,
            listed_by: row.listed_by,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PropertyResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub property: Property,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PropertiesResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub count: usize,
    pub properties: Vec<Property>,
}

impl PropertiesResponse {
    pub fn new(message: Option<String>, properties: Vec<Property>) -> Self {
        Self {
            success: true,
            message,
            count: properties.len(),
            properties,
        }
    }
}
