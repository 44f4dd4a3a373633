//! Sale listing models and DTOs.

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
const FLOOR_PLAN: &str = "floorPlan";

fn default_price_unit() -> String {
    "Crores".to_string()
}

/// Size, pricing and legal details of a property for sale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SaleDetails {
    #[serde(default)]
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    /// Built-up area in sq ft.
    #[validate(
        required(message = "Area is required"),
        range(exclusive_min = 0.0, message = "Area must be greater than zero")
    )]
    pub area: Option<f64>,
    /// Carpet area in sq ft.
    #[validate(range(exclusive_min = 0.0, message = "Carpet area must be greater than zero"))]
    pub carpet_area: Option<f64>,
    pub bhk_type: Option<String>,
    pub bathrooms: Option<u32>,
    pub furnishing_status: Option<String>,
    pub property_facing: Option<String>,
    pub property_age: Option<String>,
    #[schema(example = "8th of 22 Floors")]
    pub floor: Option<String>,
    /// New or resale.
    pub transaction_type: Option<String>,
    /// Selling price, expressed in `priceUnit`.
    #[validate(
        required(message = "Price is required"),
        range(exclusive_min = 0.0, message = "Price must be greater than zero")
    )]
    pub price: Option<f64>,
    #[serde(default = "default_price_unit")]
    #[schema(example = "Crores")]
    pub price_unit: String,
    #[validate(range(min = 0, message = "Maintenance charges cannot be negative"))]
    pub maintenance_charges: Option<i64>,
    pub rera_id: Option<String>,
    #[serde(default, deserialize_with = "string_or_seq")]
    pub amenities: Vec<String>,
}

/// Room areas in sq ft.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FloorPlan {
    #[validate(range(min = 0.0))]
    pub dining_area: Option<f64>,
    #[validate(range(min = 0.0))]
    pub bedroom_area: Option<f64>,
    #[validate(range(min = 0.0))]
    pub bathroom_area: Option<f64>,
}

impl FloorPlan {
    pub fn is_empty(&self) -> bool {
        self.dining_area.is_none() && self.bedroom_area.is_none() && self.bathroom_area.is_none()
    }
}

/// Request body for creating a sale listing.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_sale"))]
pub struct NewSaleProperty {
    #[schema(value_type = String, example = "Plot")]
    pub property_type: PropertyType,
    #[schema(value_type = String, example = "For Sale")]
    pub listing_type: ListingType,
    #[validate(nested)]
    pub basic_details: SaleDetails,
    #[validate(nested)]
    pub location: Location,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "deserialize_images")]
    #[validate(nested)]
    pub images: Vec<ImageRef>,
    #[serde(default)]
    #[validate(nested)]
    pub floor_plan: Option<FloorPlan>,
    #[serde(default)]
    pub video: Option<String>,
    #[serde(default)]
    pub virtual_tour: Option<String>,
    #[serde(default)]
    #[validate(nested)]
    pub whats_nearby: WhatsNearby,
    #[validate(nested)]
    pub contact_info: ContactInfo,
}

fn validate_sale(property: &NewSaleProperty) -> Result<(), ValidationError> {
    if property.listing_type != ListingType::ForSale {
        return Err(schema_error(
            "listing_type",
            "Sale listings must use listingType \"For Sale\"".to_string(),
        ));
    }

    Ok(())
}

impl FromListingForm for NewSaleProperty {
    const ACCEPTS_VIRTUAL_TOUR: bool = true;

    fn from_form(fields: &FormFields, uploads: FormUploads) -> Result<Self, AppError> {
        let mut images = uploads.images;
        images.extend(fields.image_urls());

        let floor_plan = FloorPlan {
            dining_area: fields.lookup_number(FLOOR_PLAN, "diningArea")?,
            bedroom_area: fields.lookup_number(FLOOR_PLAN, "bedroomArea")?,
            bathroom_area: fields.lookup_number(FLOOR_PLAN, "bathroomArea")?,
        };

        // An uploaded tour file wins over a link typed into the form.
        let virtual_tour = uploads
            .virtual_tour
            .map(|tour| tour.url)
            .or_else(|| fields.get("virtualTour").map(str::to_string));

        Ok(Self {
            property_type: fields.parse_required("propertyType")?,
            listing_type: fields.parse_required("listingType")?,
            basic_details: SaleDetails {
                title: fields.lookup_string(BASIC, "title").unwrap_or_default(),
                area: fields.lookup_number(BASIC, "area")?,
                carpet_area: fields.lookup_number(BASIC, "carpetArea")?,
                bhk_type: fields.lookup_string(BASIC, "bhkType"),
                bathrooms: fields.lookup_number(BASIC, "bathrooms")?,
                furnishing_status: fields.lookup_string(BASIC, "furnishingStatus"),
                property_facing: fields.lookup_string(BASIC, "propertyFacing"),
                property_age: fields.lookup_string(BASIC, "propertyAge"),
                floor: fields.lookup_string(BASIC, "floor"),
                transaction_type: fields.lookup_string(BASIC, "transactionType"),
                price: fields.lookup_number(BASIC, "price")?,
                price_unit: fields
                    .lookup_string(BASIC, "priceUnit")
                    .unwrap_or_else(default_price_unit),
                maintenance_charges: fields.lookup_number(BASIC, "maintenanceCharges")?,
                rera_id: fields.lookup_string(BASIC, "reraId"),
                amenities: fields.lookup_all(BASIC, "amenities"),
            },
            location: Location {
                city: fields.lookup_string(LOCATION, "city").unwrap_or_default(),
                locality: fields.lookup_string(LOCATION, "locality").unwrap_or_default(),
                landmark: fields.lookup_string(LOCATION, "landmark"),
                full_address: fields.lookup_string(LOCATION, "fullAddress"),
                pincode: fields.lookup_string(LOCATION, "pincode"),
            },
            description: fields.get("description").map(str::to_string),
            images,
            floor_plan: (!floor_plan.is_empty()).then_some(floor_plan),
            video: fields.get("video").map(str::to_string),
            virtual_tour,
            whats_nearby: fields.whats_nearby(&["education", "health", "food", "travel"])?,
            contact_info: ContactInfo {
                advisor: fields.lookup_string(CONTACT, "advisor"),
                owner: fields.lookup_string(CONTACT, "owner"),
                phone: fields.lookup_string(CONTACT, "phone").unwrap_or_default(),
                email: fields.lookup_string(CONTACT, "email").unwrap_or_default(),
            },
        })
    }
}

/// Database row for a sale listing.
#[derive(Debug, FromRow)]
pub struct SalePropertyRow {
    pub id: Uuid,
    pub property_type: String,
    pub listing_type: String,
    pub basic_details: Json<SaleDetails>,
    pub location: Json<Location>,
    pub description: Option<String>,
    pub images: Json<Vec<ImageRef>>,
    pub floor_plan: Option<Json<FloorPlan>>,
    pub video: Option<String>,
    pub virtual_tour: Option<String>,
    pub whats_nearby: Json<WhatsNearby>,
    pub contact_info: Json<ContactInfo>,
    pub listed_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A sale listing.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SaleProperty {
    pub id: Uuid,
    #[schema(value_type = String, example = "Apartment")]
    pub property_type: PropertyType,
    #[schema(value_type = String, example = "For Sale")]
    pub listing_type: ListingType,
    pub basic_details: SaleDetails,
    pub location: Location,
    pub description: Option<String>,
    pub images: Vec<ImageRef>,
    pub floor_plan: Option<FloorPlan>,
    pub video: Option<String>,
    pub virtual_tour: Option<String>,
    pub whats_nearby: WhatsNearby,
    pub contact_info: ContactInfo,
    pub listed_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<SalePropertyRow> for SaleProperty {
    type Error = AppError;

    fn try_from(row: SalePropertyRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            property_type: row.property_type.parse().map_err(AppError::internal_error)?,
            listing_type: row.listing_type.parse().map_err(AppError::internal_error)?,
            basic_details: row.basic_details.0,
            location: row.location.0,
            description: row.description,
            images: row.images.0,
            floor_plan: row.floor_plan.map(|plan| plan.0),
            video: row.video,
            virtual_tour: row.virtual_tour,
            whats_nearby: row.whats_nearby.0,
            contact_info: row.contact_info.0,
            listed_by: row.listed_by,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CreateSalePropertyResponse {
    pub success: bool,
    pub message: String,
    pub property: SaleProperty,
}

/// Single sale listing. The `Saleproperty` key is kept for existing clients.
#[derive(Debug, Serialize, ToSchema)]
pub struct SalePropertyResponse {
    pub success: bool,
    #[serde(rename = "Saleproperty")]
    pub sale_property: SaleProperty,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SalePropertiesResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub count: usize,
    pub properties: Vec<SaleProperty>,
}

impl SalePropertiesResponse {
    pub fn new(message: Option<String>, properties: Vec<SaleProperty>) -> Self {
        Self {
            success: true,
            message,
            count: properties.len(),
            properties,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct GetByIdsRequest {
    #[validate(length(min = 1, max = 100, message = "ids must contain between 1 and 100 entries"))]
    pub ids: Vec<Uuid>,
}
