use axum::{Router, routing::get};

use crate::modules::dashboard::controller::index;
use crate::modules::emails::router::init_emails_router;
use crate::modules::messages::router::init_messages_router;
use crate::modules::posts::router::init_posts_router;
use crate::modules::site_config::router::init_site_config_router;
use crate::modules::users::router::init_users_router;
use crate::state::AppState;

/// Entity routes, relative to the dashboard prefix.
pub fn init_dashboard_router() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .merge(init_users_router())
        .merge(init_emails_router())
        .merge(init_posts_router())
        .merge(init_messages_router())
        .merge(init_site_config_router())
}
