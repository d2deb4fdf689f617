use crate::state::AppState;
use axum::{Router, routing::get};

use super::controller::{home, submit_contact};

pub fn init_home_router() -> Router<AppState> {
    Router::new().route("/", get(home).post(submit_contact))
}
