use axum::extract::DefaultBodyLimit;
use axum::{
    Router,
    routing::{get, post},
};

use realty_config::UploadConfig;

use crate::state::AppState;

use super::controller::{
    add_sale_property, get_all_sale_properties, get_number, get_sale_properties_by_ids,
    get_sale_property, search_sale_properties,
};

pub fn init_sales_router(upload_config: &UploadConfig) -> Router<AppState> {
    Router::new()
        .route(
            "/add",
            post(add_sale_property).layer(DefaultBodyLimit::max(upload_config.max_body_size())),
        )
        .route("/all", get(get_all_sale_properties))
        .route("/search", get(search_sale_properties))
        .route("/get_number", get(get_number))
        .route("/getbyids", post(get_sale_properties_by_ids))
        .route("/{id}", get(get_sale_property))
}
