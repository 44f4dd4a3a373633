//! Extractor for listing submissions sent as JSON or `multipart/form-data`.
//!
//! JSON bodies are deserialized straight into the listing DTO. Multipart
//! bodies are read into [`FormFields`] plus the uploaded files, and only
//! turned into the DTO once the files have been forwarded to image storage.

use anyhow::anyhow;
use axum::extract::multipart::Field;
use axum::extract::{FromRequest, Multipart, Request};
use axum::http::header::CONTENT_TYPE;
use axum::Json;
use axum::extract::rejection::JsonRejection;
use serde::de::DeserializeOwned;
use tracing::{instrument, warn};
use validator::Validate;

use realty_config::UploadConfig;
use realty_core::{AppError, ImageStorage, StoredImage, UploadFile};
use realty_models::{FormFields, FormUploads, FromListingForm, ImageRef};

use crate::metrics::track_images_uploaded;
use crate::state::AppState;
use crate::validator::{describe_body_error, validate_dto};

const IMAGE_TYPES: &[&str] = &["image/"];
const TOUR_TYPES: &[&str] = &["image/", "video/"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FileSlot {
    Image,
    VirtualTour,
}

fn file_slot(name: &str) -> Option<FileSlot> {
    match name {
        "images" | "images[]" => Some(FileSlot::Image),
        "virtualTour" => Some(FileSlot::VirtualTour),
        _ => None,
    }
}

/// A listing body before its files have been uploaded.
#[derive(Debug)]
pub enum ListingSubmission<T> {
    Json(T),
    Form {
        fields: FormFields,
        images: Vec<UploadFile>,
        virtual_tour: Option<UploadFile>,
    },
}

impl<T> FromRequest<AppState> for ListingSubmission<T>
where
    T: DeserializeOwned + FromListingForm + Send,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &AppState) -> Result<Self, Self::Rejection> {
        let is_multipart = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.starts_with("multipart/form-data"));

        if is_multipart {
            let multipart = Multipart::from_request(req, state)
                .await
                .map_err(|e| AppError::bad_request(anyhow!(e.body_text())))?;
            return read_multipart(multipart, &state.upload_config, T::ACCEPTS_VIRTUAL_TOUR).await;
        }

        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| match rejection {
                JsonRejection::MissingJsonContentType(_) => AppError::bad_request(anyhow!(
                    "Expected a JSON or multipart/form-data body"
                )),
                JsonRejection::JsonDataError(err) => {
                    AppError::bad_request(anyhow!(describe_body_error(&err.body_text())))
                }
                _ => AppError::bad_request(anyhow!("Invalid request body")),
            })?;

        Ok(ListingSubmission::Json(value))
    }
}

async fn read_multipart<T>(
    mut multipart: Multipart,
    limits: &UploadConfig,
    accepts_virtual_tour: bool,
) -> Result<ListingSubmission<T>, AppError> {
    let mut fields = FormFields::new();
    let mut images = Vec::new();
    let mut virtual_tour = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        AppError::new(e.status(), anyhow!("Invalid multipart body: {}", e.body_text()))
    })? {
        let name = field.name().unwrap_or("").to_string();

        if field.file_name().is_none() {
            let value = field
                .text()
                .await
                .map_err(|e| AppError::bad_request(anyhow!("Invalid field {}: {}", name, e)))?;
            fields.push(name, value);
            continue;
        }

        match file_slot(&name) {
            Some(FileSlot::Image) => {
                let Some(file) = read_file(field, limits, IMAGE_TYPES).await? else {
                    continue;
                };
                if images.len() >= limits.max_images {
                    return Err(AppError::bad_request(anyhow!(
                        "Too many images. Maximum is {}",
                        limits.max_images
                    )));
                }
                images.push(file);
            }
            Some(FileSlot::VirtualTour) if accepts_virtual_tour => {
                if let Some(file) = read_file(field, limits, TOUR_TYPES).await? {
                    virtual_tour = Some(file);
                }
            }
            _ => {}
        }
    }

    Ok(ListingSubmission::Form {
        fields,
        images,
        virtual_tour,
    })
}

/// Reads one file part. Empty parts (an untouched file input) yield `None`.
async fn read_file(
    mut field: Field<'_>,
    limits: &UploadConfig,
    allowed_types: &[&str],
) -> Result<Option<UploadFile>, AppError> {
    let file_name = field.file_name().unwrap_or("upload").to_string();
    let content_type = field.content_type().map(str::to_string);

    let mut bytes = Vec::new();
    while let Some(chunk) = field
        .chunk()
        .await
        .map_err(|e| AppError::new(e.status(), anyhow!("Failed to read {}: {}", file_name, e.body_text())))?
    {
        if bytes.len() + chunk.len() > limits.max_file_size {
            return Err(AppError::payload_too_large(format!(
                "File too large. Maximum size is {}MB",
                limits.max_file_size_mb()
            )));
        }
        bytes.extend_from_slice(&chunk);
    }

    if bytes.is_empty() {
        return Ok(None);
    }

    let file = UploadFile::new(file_name, content_type, bytes);
    if !file.has_content_type(allowed_types) {
        return Err(AppError::bad_request(anyhow!(
            "Unsupported file type for {}. Only image files are allowed",
            file.file_name
        )));
    }

    Ok(Some(file))
}

impl<T> ListingSubmission<T>
where
    T: FromListingForm + Validate,
{
    /// Uploads any files, builds the DTO and validates it.
    ///
    /// Returns the DTO with the file ids that were uploaded. If anything
    /// fails after an upload, the uploaded files are deleted again.
    #[instrument(skip_all)]
    pub async fn resolve(self, storage: &dyn ImageStorage) -> Result<(T, Vec<String>), AppError> {
        let (fields, images, virtual_tour) = match self {
            ListingSubmission::Json(dto) => {
                validate_dto(&dto)?;
                return Ok((dto, Vec::new()));
            }
            ListingSubmission::Form {
                fields,
                images,
                virtual_tour,
            } => (fields, images, virtual_tour),
        };

        let mut uploaded: Vec<StoredImage> = Vec::new();
        let mut uploads = FormUploads::default();

        let files = images
            .into_iter()
            .map(|file| (FileSlot::Image, file))
            .chain(virtual_tour.map(|file| (FileSlot::VirtualTour, file)));

        for (slot, file) in files {
            match storage.upload(file).await {
                Ok(stored) => {
                    let image = ImageRef {
                        url: stored.url.clone(),
                        file_id: Some(stored.file_id.clone()),
                        name: Some(stored.name.clone()),
                    };
                    match slot {
                        FileSlot::Image => uploads.images.push(image),
                        FileSlot::VirtualTour => uploads.virtual_tour = Some(image),
                    }
                    uploaded.push(stored);
                }
                Err(e) => {
                    let file_ids = file_ids(&uploaded);
                    cleanup_uploads(storage, &file_ids).await;
                    return Err(AppError::bad_gateway(anyhow!("Image upload failed: {}", e)));
                }
            }
        }

        track_images_uploaded(uploaded.len());
        let file_ids = file_ids(&uploaded);

        let dto = match T::from_form(&fields, uploads).and_then(|dto| {
            validate_dto(&dto)?;
            Ok(dto)
        }) {
            Ok(dto) => dto,
            Err(e) => {
                cleanup_uploads(storage, &file_ids).await;
                return Err(e);
            }
        };

        Ok((dto, file_ids))
    }
}

fn file_ids(uploaded: &[StoredImage]) -> Vec<String> {
    uploaded.iter().map(|s| s.file_id.clone()).collect()
}

/// Best-effort removal of files that ended up unused.
pub async fn cleanup_uploads(storage: &dyn ImageStorage, file_ids: &[String]) {
    for file_id in file_ids {
        if let Err(e) = storage.delete(file_id).await {
            warn!(file_id = %file_id, error = %e, "Failed to delete orphaned upload");
        }
    }
}
