use axum::{Router, routing::post};

use crate::state::AppState;

use super::controller::send_contact_message;

pub fn init_contact_router() -> Router<AppState> {
    Router::new().route("/", post(send_contact_message))
}
