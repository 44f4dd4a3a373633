use axum::extract::DefaultBodyLimit;
use axum::{
    Router,
    routing::{get, post},
};

use realty_config::UploadConfig;

use crate::modules::bookings::controller::book_property;
use crate::state::AppState;

use super::controller::{
    add_property, get_all_properties, get_number, get_property, search_properties,
};

pub fn init_properties_router(upload_config: &UploadConfig) -> Router<AppState> {
    Router::new()
        .route(
            "/add",
            post(add_property).layer(DefaultBodyLimit::max(upload_config.max_body_size())),
        )
        .route("/all", get(get_all_properties))
        .route("/search", get(search_properties))
        .route("/get_number", get(get_number))
        .route("/{id}", get(get_property))
        .route("/{id}/book", post(book_property))
}
