//! Types shared by rental and sale listings.
//!
//! Both listing kinds store their nested documents (details, location,
//! images, nearby places, contact info) as JSONB using the same camelCase
//! field names the API exposes.

use std::fmt;
use std::str::FromStr;

use realty_core::AppError;
use realty_core::serde::empty_string_as_none;
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError};

/// Kind of property being listed.
///
/// Rentals accept every kind except [`PropertyType::CommercialSpace`] and
/// [`PropertyType::Plot`], which are only offered for sale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum PropertyType {
    #[serde(rename = "Apartment")]
    Apartment,
    #[serde(rename = "Independent House")]
    IndependentHouse,
    #[serde(rename = "Villa")]
    Villa,
    #[serde(rename = "Commercial Space")]
    CommercialSpace,
    #[serde(rename = "Plot")]
    Plot,
    #[serde(rename = "Office")]
    Office,
    #[serde(rename = "Shop")]
    Shop,
}

impl PropertyType {
    pub const ALL: [PropertyType; 7] = [
        PropertyType::Apartment,
        PropertyType::IndependentHouse,
        PropertyType::Villa,
        PropertyType::CommercialSpace,
        PropertyType::Plot,
        PropertyType::Office,
        PropertyType::Shop,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyType::Apartment => "Apartment",
            PropertyType::IndependentHouse => "Independent House",
            PropertyType::Villa => "Villa",
            PropertyType::CommercialSpace => "Commercial Space",
            PropertyType::Plot => "Plot",
            PropertyType::Office => "Office",
            PropertyType::Shop => "Shop",
        }
    }

    pub fn is_rentable(&self) -> bool {
        !matches!(self, PropertyType::CommercialSpace | PropertyType::Plot)
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PropertyType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        PropertyType::ALL
            .into_iter()
            .find(|t| t.as_str() == trimmed)
            .ok_or_else(|| format!("Invalid propertyType: {}", trimmed))
    }
}

impl TryFrom<String> for PropertyType {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Whether a listing is offered for rent or for sale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum ListingType {
    #[serde(rename = "For Rent")]
    ForRent,
    #[serde(rename = "For Sale")]
    ForSale,
}

impl ListingType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ListingType::ForRent => "For Rent",
            ListingType::ForSale => "For Sale",
        }
    }
}

impl fmt::Display for ListingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ListingType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "For Rent" => Ok(ListingType::ForRent),
            "For Sale" => Ok(ListingType::ForSale),
            other => Err(format!("Invalid listingType: {}", other)),
        }
    }
}

impl TryFrom<String> for ListingType {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// An image attached to a listing.
///
/// Uploaded files carry the CDN `fileId` and original `name`; images given
/// as plain URLs only have `url`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ImageRef {
    #[validate(length(min = 1, message = "Image url is required"))]
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl ImageRef {
    pub fn from_url(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            file_id: None,
            name: None,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ImageInput {
    Url(String),
    Full(ImageRef),
}

impl From<ImageInput> for ImageRef {
    fn from(input: ImageInput) -> Self {
        match input {
            ImageInput::Url(url) => ImageRef::from_url(url),
            ImageInput::Full(image) => image,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ImagesInput {
    One(ImageInput),
    List(Vec<ImageInput>),
    Keyed(std::collections::BTreeMap<String, ImageInput>),
}

/// Accepts `images` as a single URL, a list of URLs or image objects, or an
/// object keyed by index such as `{"0": "https://..."}`.
pub fn deserialize_images<'de, D>(deserializer: D) -> Result<Vec<ImageRef>, D::Error>
where
    D: Deserializer<'de>,
{
    let input: Option<ImagesInput> = Option::deserialize(deserializer)?;
    Ok(match input {
        None => Vec::new(),
        Some(ImagesInput::One(image)) => vec![image.into()],
        Some(ImagesInput::List(images)) => images.into_iter().map(Into::into).collect(),
        Some(ImagesInput::Keyed(images)) => images.into_values().map(Into::into).collect(),
    })
}

/// A point of interest near a listing. Distance is in kilometres.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct NearbyPlace {
    #[validate(length(min = 1, message = "Nearby place name is required"))]
    pub name: String,
    #[validate(range(min = 0.0, message = "Distance cannot be negative"))]
    pub distance: f64,
}

/// Nearby places grouped by category.
///
/// Rentals use `culture`; sale listings use `travel`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct WhatsNearby {
    #[serde(default)]
    #[validate(nested)]
    pub education: Vec<NearbyPlace>,
    #[serde(default)]
    #[validate(nested)]
    pub health: Vec<NearbyPlace>,
    #[serde(default)]
    #[validate(nested)]
    pub food: Vec<NearbyPlace>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    #[validate(nested)]
    pub culture: Vec<NearbyPlace>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    #[validate(nested)]
    pub travel: Vec<NearbyPlace>,
}

impl WhatsNearby {
    pub fn category_mut(&mut self, category: &str) -> Option<&mut Vec<NearbyPlace>> {
        match category {
            "education" => Some(&mut self.education),
            "health" => Some(&mut self.health),
            "food" => Some(&mut self.food),
            "culture" => Some(&mut self.culture),
            "travel" => Some(&mut self.travel),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    #[serde(default)]
    #[validate(length(min = 1, message = "City is required"))]
    pub city: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Locality is required"))]
    pub locality: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub landmark: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pincode: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContactInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub advisor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    #[serde(default)]
    #[validate(length(min = 1, message = "Contact phone is required"))]
    pub phone: String,
    #[serde(default)]
    #[validate(email(message = "Contact email must be a valid email address"))]
    pub email: String,
}

/// Rejects values that are empty once trimmed.
pub(crate) fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

pub(crate) fn schema_error(code: &'static str, message: String) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(message.into());
    err
}

/// Query string accepted by the listing `all` and `search` endpoints.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ListingQuery {
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub property_type: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub listing_type: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub bhk_type: Option<String>,
    /// Case-insensitive substring match on the city.
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub city: Option<String>,
    /// Case-insensitive substring match on the locality.
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub locality: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub min_price: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub max_price: Option<String>,
}

/// Which price field a filter bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceField {
    MonthlyRent,
    Price,
}

impl PriceField {
    pub fn json_key(&self) -> &'static str {
        match self {
            PriceField::MonthlyRent => "monthlyRent",
            PriceField::Price => "price",
        }
    }
}

/// A parsed and checked [`ListingQuery`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingFilter {
    pub property_type: Option<String>,
    pub listing_type: Option<String>,
    pub bhk_type: Option<String>,
    pub city: Option<String>,
    pub locality: Option<String>,
    pub min_price: Option<i64>,
    pub max_price: Option<i64>,
}

impl ListingFilter {
    pub fn is_empty(&self) -> bool {
        *self == ListingFilter::default()
    }
}

fn parse_price(name: &str, value: Option<String>) -> Result<Option<i64>, AppError> {
    value
        .map(|v| {
            v.parse::<i64>().map_err(|_| {
                AppError::bad_request(anyhow::anyhow!("{} must be a whole number", name))
            })
        })
        .transpose()
}

impl TryFrom<ListingQuery> for ListingFilter {
    type Error = AppError;

    fn try_from(query: ListingQuery) -> Result<Self, Self::Error> {
        let min_price = parse_price("minPrice", query.min_price)?;
        let max_price = parse_price("maxPrice", query.max_price)?;

        Ok(Self {
            property_type: query.property_type,
            listing_type: query.listing_type,
            bhk_type: query.bhk_type,
            city: query.city,
            locality: query.locality,
            min_price,
            max_price,
        })
    }
}

/// Response for the `get_number` endpoints.
#[derive(Debug, Serialize, ToSchema)]
pub struct OwnerNumberResponse {
    pub success: bool,
    pub message: String,
    pub number: String,
}
