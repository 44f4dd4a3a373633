//! Image storage abstraction.
//!
//! Listing photos are not kept on the API host. They are forwarded to a
//! managed image service and only the returned URL and file id are stored
//! with the listing. Backends implement [`ImageStorage`] so services can be
//! exercised against an in-memory store in tests.
//!
//! # Example
//!
//! ```ignore
//! use realty_core::image_storage::{ImageStorage, UploadFile};
//!
//! let stored = storage
//!     .upload(UploadFile::new("front.jpg", Some("image/jpeg".into()), bytes))
//!     .await?;
//!
//! // Roll back if the listing could not be saved
//! storage.delete(&stored.file_id).await?;
//! ```

use std::fmt;
use std::future::Future;
use std::pin::Pin;

use thiserror::Error;

pub type StorageFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, StorageError>> + Send + 'a>>;

/// Abstract trait for image storage backends.
pub trait ImageStorage: Send + Sync + fmt::Debug {
    /// Upload a file and return where it can be fetched from.
    fn upload(&self, file: UploadFile) -> StorageFuture<'_, StoredImage>;

    /// Delete a previously uploaded file by its backend id.
    fn delete<'a>(&'a self, file_id: &'a str) -> StorageFuture<'a, ()>;
}

/// A file received from a client, held in memory until it is forwarded.
#[derive(Clone)]
pub struct UploadFile {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    pub fn new(file_name: impl Into<String>, content_type: Option<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type,
            bytes,
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// True when the declared content type starts with one of `prefixes`.
    pub fn has_content_type(&self, prefixes: &[&str]) -> bool {
        self.content_type
            .as_deref()
            .map(|ct| prefixes.iter().any(|p| ct.starts_with(p)))
            .unwrap_or(false)
    }
}

impl fmt::Debug for UploadFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UploadFile")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Location of an uploaded file as reported by the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredImage {
    pub url: String,
    pub file_id: String,
    pub name: String,
}

/// Error type for image storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backend answered with a non-success status.
    #[error("storage backend returned {status}: {body}")]
    Upstream { status: u16, body: String },

    /// The backend could not be reached or the request could not be built.
    #[error("storage request failed: {0}")]
    Transport(String),

    /// The backend replied with something we could not understand.
    #[error("unexpected storage response: {0}")]
    InvalidResponse(String),
}
