use crate::logging::logging_middleware;
use crate::middleware::auth::authenticate;
use crate::modules::auth::router::init_auth_router;
use crate::modules::dashboard::router::init_dashboard_router;
use crate::modules::home::router::init_home_router;
use crate::state::AppState;
use axum::http::{HeaderValue, Method};
use axum::{Router, middleware};
use tower_http::cors::CorsLayer;

pub fn init_router(state: AppState) -> Router {
    let router = Router::new()
        .merge(init_home_router())
        .merge(init_auth_router())
        .nest(&state.paths.dashboard_prefix, init_dashboard_router())
        .layer(middleware::from_fn_with_state(state.clone(), authenticate))
        .with_state(state.clone());

    let router = if state.cors_config.is_enabled() {
        router.layer(cors_layer(&state))
    } else {
        router
    };

    router.layer(middleware::from_fn(logging_middleware))
}

fn cors_layer(state: &AppState) -> CorsLayer {
    let allowed_origins: Vec<HeaderValue> = state
        .cors_config
        .allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            axum::http::header::AUTHORIZATION,
            axum::http::header::CONTENT_TYPE,
            axum::http::header::ACCEPT,
        ])
        .allow_credentials(true)
}
