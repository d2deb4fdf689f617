use axum::extract::FromRef;
use axum_extra::extract::cookie::Key;
use sitekit_config::{
    AppConfig, CookieConfig, CorsConfig, EmailConfig, JwtConfig, PathConfig, Settings,
};
use sqlx::PgPool;

use crate::utils::email::EmailQueue;
use crate::utils::flash::derive_flash_key;

#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub app_config: AppConfig,
    pub paths: PathConfig,
    pub jwt_config: JwtConfig,
    pub cookie_config: CookieConfig,
    pub email_config: EmailConfig,
    pub cors_config: CorsConfig,
    pub flash_key: Key,
    pub email_queue: EmailQueue,
}

impl AppState {
    pub fn new(db: PgPool, settings: Settings, email_queue: EmailQueue) -> Self {
        Self {
            db,
            flash_key: derive_flash_key(&settings.jwt.secret),
            app_config: settings.app,
            paths: settings.paths,
            jwt_config: settings.jwt,
            cookie_config: settings.cookies,
            email_config: settings.email,
            cors_config: settings.cors,
            email_queue,
        }
    }

    /// Page size for dashboard lists.
    pub fn page_size(&self) -> i64 {
        self.app_config.pagination_max_size
    }
}

impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.flash_key.clone()
    }
}
