use crate::modules::site_config::controller::{config_detail, update_config, update_config_form};
use crate::state::AppState;
use axum::{Router, routing::get};

pub fn init_site_config_router() -> Router<AppState> {
    Router::new()
        .route("/config/", get(config_detail))
        .route("/config/update/", get(update_config_form).post(update_config))
}
