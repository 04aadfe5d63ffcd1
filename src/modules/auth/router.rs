use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use super::controller::{get_current_user, login_user, register_user, verify_token};

pub fn init_auth_router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register_user))
        .route("/login", post(login_user))
        .route("/me", get(get_current_user))
        .route("/verify", get(verify_token))
}
