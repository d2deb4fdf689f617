use crate::state::AppState;
use axum::{Router, routing::get};

use super::controller::{login, login_form, logout};

pub fn init_auth_router() -> Router<AppState> {
    Router::new()
        .route("/auth/login/", get(login_form).post(login))
        .route("/auth/logout/", get(logout))
}
