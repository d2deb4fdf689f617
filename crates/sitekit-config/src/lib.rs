//! # sitekit config
//!
//! Typed configuration read from the process environment.
//!
//! Every group has a `from_env()` constructor that falls back to development
//! defaults, and a `Default` impl with the same values for tests. [`Settings`]
//! bundles all groups; it is built once at startup (after `.env` has been
//! loaded by the binary) and handed to the application state. [`LogConfig`]
//! stays outside it: tracing is set up before the other groups are read.

pub mod app;
pub mod cookie;
pub mod cors;
pub mod database;
pub mod email;
pub mod jwt;
pub mod logging;
pub mod paths;

use std::env;
use std::str::FromStr;

pub use app::AppConfig;
pub use cookie::CookieConfig;
pub use cors::CorsConfig;
pub use database::DatabaseConfig;
pub use email::EmailConfig;
pub use jwt::JwtConfig;
pub use logging::LogConfig;
pub use paths::PathConfig;

#[derive(Clone, Debug, Default)]
pub struct Settings {
    pub app: AppConfig,
    pub paths: PathConfig,
    pub jwt: JwtConfig,
    pub cookies: CookieConfig,
    pub email: EmailConfig,
    pub cors: CorsConfig,
    pub database: DatabaseConfig,
}

impl Settings {
    pub fn from_env() -> Self {
        let app = AppConfig::from_env();
        let email = EmailConfig::from_env(&app.project_name);
        Self {
            paths: PathConfig::from_env(),
            jwt: JwtConfig::from_env(),
            cookies: CookieConfig::from_env(),
            cors: CorsConfig::from_env(),
            database: DatabaseConfig::from_env(),
            email,
            app,
        }
    }
}

pub(crate) fn env_parse<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(default)
}

pub(crate) fn env_string(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

pub(crate) fn env_optional(key: &str) -> Option<String> {
    env::var(key).ok().filter(|s| !s.trim().is_empty())
}

pub(crate) fn env_flag(key: &str, default: bool) -> bool {
    env::var(key)
        .map(|v| matches!(v.trim().to_lowercase().as_str(), "true" | "1" | "yes"))
        .unwrap_or(default)
}
