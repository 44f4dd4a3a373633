//! Flat `multipart/form-data` listing submissions.
//!
//! HTML forms send listings as flat text fields (`title`, `city`,
//! `educationName`, ...) next to the uploaded files. Nested names in
//! bracket notation (`basicDetails[title]`) are accepted as well and take
//! precedence over the flat name.

use std::str::FromStr;

use anyhow::anyhow;
use realty_core::AppError;

use crate::listing::{ImageRef, NearbyPlace, WhatsNearby};

/// Text fields of a multipart submission, in the order they were received.
#[derive(Debug, Clone, Default)]
pub struct FormFields {
    values: Vec<(String, String)>,
}

impl FormFields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.push((name.into(), value.into()));
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// First non-blank value for `name`, trimmed.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values
            .iter()
            .filter(|(key, _)| key == name)
            .map(|(_, value)| value.trim())
            .find(|value| !value.is_empty())
    }

    /// Value for `section[name]`, falling back to the flat `name`.
    pub fn lookup(&self, section: &str, name: &str) -> Option<&str> {
        self.get(&format!("{}[{}]", section, name))
            .or_else(|| self.get(name))
    }

    pub fn lookup_string(&self, section: &str, name: &str) -> Option<String> {
        self.lookup(section, name).map(str::to_string)
    }

    /// Every non-blank value sent as `name`, `name[]` or `name[<index>]`.
    pub fn all(&self, name: &str) -> Vec<String> {
        self.values
            .iter()
            .filter(|(key, _)| is_repeated_key(key, name))
            .map(|(_, value)| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .collect()
    }

    /// Like [`FormFields::all`], also checking `section[name]` variants.
    pub fn lookup_all(&self, section: &str, name: &str) -> Vec<String> {
        let nested = self.all(&format!("{}[{}]", section, name));
        if nested.is_empty() {
            self.all(name)
        } else {
            nested
        }
    }

    /// Parses `section[name]` or `name` as a number.
    pub fn lookup_number<T: FromStr>(&self, section: &str, name: &str) -> Result<Option<T>, AppError> {
        self.lookup(section, name)
            .map(|raw| {
                parse_finite::<T>(raw)
                    .ok_or_else(|| AppError::bad_request(anyhow!("{} must be a number", name)))
            })
            .transpose()
    }

    /// Parses a required field such as `propertyType`.
    pub fn parse_required<T>(&self, name: &str) -> Result<T, AppError>
    where
        T: FromStr<Err = String>,
    {
        self.get(name)
            .ok_or_else(|| AppError::bad_request(anyhow!("{} is required", name)))?
            .parse::<T>()
            .map_err(|e| AppError::bad_request(anyhow!(e)))
    }

    /// Builds the nearby places for `categories`.
    ///
    /// A `whatsNearby` field holding a JSON object wins. Otherwise each
    /// category takes a single entry from its `<category>Name` and
    /// `<category>Distance` pair, and only when both are present.
    pub fn whats_nearby(&self, categories: &[&str]) -> Result<WhatsNearby, AppError> {
        if let Some(raw) = self.get("whatsNearby") {
            return serde_json::from_str(raw)
                .map_err(|_| AppError::bad_request(anyhow!("whatsNearby must be a JSON object")));
        }

        let mut nearby = WhatsNearby::default();
        for category in categories {
            let name = self.get(&format!("{}Name", category));
            let distance = self.get(&format!("{}Distance", category));

            if let (Some(name), Some(distance)) = (name, distance) {
                let distance = parse_finite::<f64>(distance).ok_or_else(|| {
                    AppError::bad_request(anyhow!("{}Distance must be a number", category))
                })?;
                if let Some(places) = nearby.category_mut(category) {
                    places.push(NearbyPlace {
                        name: name.to_string(),
                        distance,
                    });
                }
            }
        }

        Ok(nearby)
    }

    /// Image URLs submitted as text, appended after uploaded files.
    pub fn image_urls(&self) -> Vec<ImageRef> {
        self.all("images").into_iter().map(ImageRef::from_url).collect()
    }
}

/// `NaN` and infinities parse as `f64` but cannot be stored in JSONB.
fn parse_finite<T: FromStr>(raw: &str) -> Option<T> {
    if raw.parse::<f64>().is_ok_and(|v| !v.is_finite()) {
        return None;
    }
    raw.parse::<T>().ok()
}

fn is_repeated_key(key: &str, name: &str) -> bool {
    match key.strip_prefix(name) {
        Some("") | Some("[]") => true,
        Some(rest) => rest
            .strip_prefix('[')
            .and_then(|r| r.strip_suffix(']'))
            .map(|index| !index.is_empty() && index.chars().all(|c| c.is_ascii_digit()))
            .unwrap_or(false),
        None => false,
    }
}

/// Files already forwarded to image storage for this submission.
#[derive(Debug, Clone, Default)]
pub struct FormUploads {
    pub images: Vec<ImageRef>,
    pub virtual_tour: Option<ImageRef>,
}

/// Conversion from a flat form submission into a listing DTO.
pub trait FromListingForm: Sized {
    /// Whether a `virtualTour` file is accepted alongside the images.
    const ACCEPTS_VIRTUAL_TOUR: bool = false;

    fn from_form(fields: &FormFields, uploads: FormUploads) -> Result<Self, AppError>;
}
