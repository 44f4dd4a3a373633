//! # Realty Core
//!
//! Core types, errors, and utilities for the Realty API.
//!
//! This crate provides foundational types used throughout the application:
//!
//! - [`errors`]: Application error type with HTTP response conversion
//! - [`image_storage`]: Storage abstraction for uploaded listing images
//! - [`password`]: Password hashing and verification
//! - [`serde`]: Custom serde deserialization helpers
//!
//! # Example
//!
//! ```ignore
//! use realty_core::errors::AppError;
//! use realty_core::password::{hash_password, verify_password};
//!
//! let error = AppError::not_found(anyhow::anyhow!("Property not found"));
//!
//! let hash = hash_password("secure_password")?;
//! assert!(verify_password("secure_password", &hash)?);
//! ```

pub mod errors;
pub mod image_storage;
pub mod password;
pub mod serde;

// Re-export commonly used types at crate root
pub use errors::AppError;
pub use image_storage::{ImageStorage, StorageError, StoredImage, UploadFile};
pub use password::{hash_password, verify_password};
