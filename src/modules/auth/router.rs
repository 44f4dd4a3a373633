use axum::{Router, routing::post};

use crate::state::AppState;

use super::controller::{forgot_password, login_user, logout_user, reset_password};

pub fn init_auth_router() -> Router<AppState> {
    Router::new()
        .route("/login", post(login_user))
        .route("/logout", post(logout_user))
        .route("/forgot-password", post(forgot_password))
        .route("/reset-password", post(reset_password))
}
