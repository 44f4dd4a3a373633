use axum::{
    Router,
    routing::{delete, get, post, put},
};

use crate::modules::bookings::controller::get_booking_history;
use crate::state::AppState;

use super::controller::{
    delete_user, get_profile, get_user_listings, register_user, update_user,
};

pub fn init_users_router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register_user))
        .route("/update/{id}", put(update_user))
        .route("/delete/{id}", delete(delete_user))
        .route("/profile", get(get_profile))
        .route("/listings", get(get_user_listings))
        .route("/bookings", get(get_booking_history))
}
