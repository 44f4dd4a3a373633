//! Utility modules for the Realty API.
//!
//! - [`email`]: Transactional email over SMTP
//! - [`imagekit`]: ImageKit client implementing the image storage trait
//! - [`listing_filter`]: SQL filter clause shared by both listing tables
//! - [`listing_form`]: JSON or multipart listing submission extractor

pub mod email;
pub mod imagekit;
pub mod listing_filter;
pub mod listing_form;
